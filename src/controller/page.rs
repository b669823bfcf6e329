use std::sync::Arc;

use tokio::time::Instant;

use crate::animation::{sequence, Scene, TimelineHandle, FRAME_INTERVAL};
use crate::client::WaitlistStore;
use crate::controller::submission::{SubmitRejected, Submission};

/// One view of the landing page.
///
/// Owns the submission state, the entrance timeline and the success banner timeline for as
/// long as the page is mounted. Every method runs on the page's own task; the store call in
/// [`PageController::submit`] is the only suspension point.
#[derive(Debug)]
pub struct PageController<S: ?Sized> {
    store: Arc<S>,
    submission: Submission,
    entrance: Option<TimelineHandle>,
    banner: Option<TimelineHandle>,
}

impl<S> PageController<S>
where
    S: WaitlistStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            submission: Submission::new(),
            entrance: None,
            banner: None,
        }
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn is_mounted(&self) -> bool {
        self.entrance.is_some()
    }

    /// Start the entrance sequence. Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }
        tracing::debug!("Mounting landing page");
        self.entrance = Some(TimelineHandle::spawn(sequence::entrance(), FRAME_INTERVAL));
    }

    /// Current state of the page's revealable elements
    pub fn scene(&self) -> Scene {
        match &self.entrance {
            Some(handle) => handle.current(),
            None => sequence::entrance().pre_mount(),
        }
    }

    /// Current state of the success banner, `None` when it is not shown
    pub fn banner(&self) -> Option<Scene> {
        self.banner.as_ref().map(TimelineHandle::current)
    }

    pub fn input(&mut self, value: impl Into<String>) {
        self.submission.input(value);
    }

    /// Submit the form, presenting the success banner when the store accepts the email
    pub async fn submit(&mut self) -> Result<(), SubmitRejected> {
        let store = self.store.clone();
        self.submission.submit(store.as_ref()).await?;

        if self.submission.show_success() && self.is_mounted() {
            self.banner = Some(TimelineHandle::spawn(
                sequence::success_banner(),
                FRAME_INTERVAL,
            ));
        }
        Ok(())
    }

    /// Fire due timers. Returns whether the submission state changed.
    pub fn poll(&mut self) -> bool {
        let changed = self.submission.poll(Instant::now());
        if changed {
            self.dismiss_banner();
        }
        changed
    }

    /// "Add another": dismiss the success confirmation
    pub fn reset(&mut self) {
        self.submission.reset();
        self.dismiss_banner();
    }

    /// Tear the view down: cancel every timeline and pending timer
    pub fn unmount(&mut self) {
        self.submission.cancel_timers();
        self.dismiss_banner();
        if let Some(mut entrance) = self.entrance.take() {
            entrance.cancel();
            tracing::debug!("Unmounted landing page");
        }
    }

    fn dismiss_banner(&mut self) {
        if let Some(mut banner) = self.banner.take() {
            banner.cancel();
        }
    }
}
