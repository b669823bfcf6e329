use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{Scene, Timeline};

/// Interval between published frames, roughly one display refresh
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A running timeline.
///
/// A tokio task samples the timeline every frame and publishes the scene on a watch channel.
/// Cancelling the handle, or dropping it, aborts the task and reverts every element to its
/// pre-mount state. No frame is published after that.
#[derive(Debug)]
pub struct TimelineHandle {
    frames: Arc<watch::Sender<Scene>>,
    live: Arc<AtomicBool>,
    pre_mount: Scene,
    task: Option<JoinHandle<()>>,
}

impl TimelineHandle {
    /// Start `timeline` now. Must be called from within a tokio runtime.
    pub fn spawn(timeline: Timeline, frame_interval: Duration) -> Self {
        let (frames, _) = watch::channel(timeline.sample(Duration::ZERO));
        let frames = Arc::new(frames);
        let live = Arc::new(AtomicBool::new(true));
        let pre_mount = timeline.pre_mount();

        let task = tokio::spawn(run(
            timeline,
            frame_interval,
            frames.clone(),
            live.clone(),
        ));

        Self {
            frames,
            live,
            pre_mount,
            task: Some(task),
        }
    }

    /// The most recently published scene
    pub fn current(&self) -> Scene {
        self.frames.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Scene> {
        self.frames.subscribe()
    }

    /// Whether a one-shot timeline has played to its end, or the handle was cancelled
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    pub fn is_cancelled(&self) -> bool {
        !self.live.load(Ordering::Acquire)
    }

    /// Stop the timeline and revert its elements. Idempotent.
    pub fn cancel(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();

        // The flag flips under the channel lock, so a frame racing with the abort is dropped
        let live = &self.live;
        let pre_mount = self.pre_mount.clone();
        self.frames.send_modify(|scene| {
            live.store(false, Ordering::Release);
            *scene = pre_mount;
        });
        tracing::debug!("Timeline cancelled and reverted");
    }
}

impl Drop for TimelineHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run(
    timeline: Timeline,
    frame_interval: Duration,
    frames: Arc<watch::Sender<Scene>>,
    live: Arc<AtomicBool>,
) {
    let started = Instant::now();
    let end = (!timeline.is_infinite()).then(|| timeline.duration());

    let mut ticks = time::interval(frame_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticks.tick().await;

        let elapsed = started.elapsed();
        let frame = timeline.sample(end.map_or(elapsed, |end| elapsed.min(end)));

        let published = frames.send_if_modified(|scene| {
            if !live.load(Ordering::Acquire) {
                return false;
            }
            *scene = frame;
            true
        });
        if !published {
            break;
        }
        if matches!(end, Some(end) if elapsed >= end) {
            tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "Timeline completed");
            break;
        }
    }
}
