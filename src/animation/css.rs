use std::fmt::Write;
use std::time::Duration;

use super::{ElementState, Property, Repeat, Scene, Timeline, Tween};

/// Spacing between exported keyframes
const FRAME_STEP: Duration = Duration::from_millis(50);

impl Timeline {
    /// Render the timeline as a stylesheet for the page's element ids.
    ///
    /// Each element gets its pre-mount state, one sampled keyframe animation covering every
    /// one-shot tween, and one animation per endless tween. Keyframes are linear between
    /// samples, the easing is baked into the sampled values.
    pub fn to_css(&self, name: &str) -> String {
        let mut css = String::new();

        let one_shot_end = self.duration().max(Duration::from_millis(1));
        let frames = frame_count(one_shot_end);
        let scenes: Vec<Scene> = (0..=frames)
            .map(|i| self.sample(one_shot_end.mul_f64(i as f64 / frames as f64)))
            .collect();

        for (element, pre_mount) in self.pre_mount().iter() {
            let id = element.dom_id();
            let glows = self
                .tweens()
                .iter()
                .any(|t| t.element == element && t.to.touches(Property::Glow));

            let _ = writeln!(css, "#{} {{ {} }}", id, declarations(pre_mount, glows));

            let entrance = format!("{}-{}", name, id);
            let _ = writeln!(css, "@keyframes {} {{", entrance);
            for (i, scene) in scenes.iter().enumerate() {
                if let Some(state) = scene.get(element) {
                    let _ = writeln!(
                        css,
                        "  {:.2}% {{ {} }}",
                        percent(i, frames),
                        declarations(state, false)
                    );
                }
            }
            let _ = writeln!(css, "}}");

            let mut animations = vec![format!(
                "{} {}ms linear 0ms 1 normal both",
                entrance,
                one_shot_end.as_millis()
            )];

            let endless = self
                .tweens()
                .iter()
                .filter(|t| t.element == element && t.end().is_none());
            for (n, tween) in endless.enumerate() {
                let loop_name = format!("{}-{}-loop-{}", name, id, n);
                write_loop_keyframes(&mut css, &loop_name, self, tween);

                let direction = match tween.repeat {
                    Repeat::Forever { yoyo: true } => "alternate",
                    _ => "normal",
                };
                animations.push(format!(
                    "{} {}ms linear {}ms infinite {} none",
                    loop_name,
                    tween.duration.as_millis().max(1),
                    tween.start.as_millis(),
                    direction
                ));
            }

            let _ = writeln!(css, "#{} {{ animation: {}; }}", id, animations.join(", "));
        }
        css
    }
}

/// Keyframes for one forward cycle of an endless tween, over only the properties it drives
fn write_loop_keyframes(css: &mut String, loop_name: &str, timeline: &Timeline, tween: &Tween) {
    let from = timeline
        .sample(tween.start)
        .get(tween.element)
        .copied()
        .unwrap_or(ElementState::HIDDEN);
    let frames = frame_count(tween.duration);

    let _ = writeln!(css, "@keyframes {} {{", loop_name);
    for i in 0..=frames {
        let progress = tween.ease.apply(i as f64 / frames as f64);
        let mut state = from;
        for (property, target) in tween.to.values() {
            let start = from.get(property);
            state.set(property, start + (target - start) * progress);
        }

        let mut rules = Vec::new();
        if tween.to.touches(Property::Opacity) {
            rules.push(format!("opacity: {:.3};", state.opacity));
        }
        if [Property::Y, Property::Scale, Property::Rotation]
            .iter()
            .any(|p| tween.to.touches(*p))
        {
            rules.push(transform(&state));
        }
        if tween.to.touches(Property::Glow) {
            rules.push(glow_shadow(state.glow));
        }
        let _ = writeln!(
            css,
            "  {:.2}% {{ {} }}",
            percent(i, frames),
            rules.join(" ")
        );
    }
    let _ = writeln!(css, "}}");
}

fn frame_count(span: Duration) -> usize {
    ((span.as_secs_f64() / FRAME_STEP.as_secs_f64()).ceil() as usize).max(1)
}

fn percent(frame: usize, frames: usize) -> f64 {
    frame as f64 * 100.0 / frames as f64
}

fn declarations(state: &ElementState, with_glow: bool) -> String {
    let visibility = if state.visible { "visible" } else { "hidden" };
    let mut rules = format!(
        "opacity: {:.3}; visibility: {}; {}",
        state.opacity,
        visibility,
        transform(state)
    );
    if with_glow {
        rules.push(' ');
        rules.push_str(&glow_shadow(state.glow));
    }
    rules
}

fn transform(state: &ElementState) -> String {
    format!(
        "transform: translateY({:.2}px) scale({:.4}) rotate({:.2}deg);",
        state.y, state.scale, state.rotation
    )
}

/// Orange halo whose reach and strength grow with `glow`
fn glow_shadow(glow: f64) -> String {
    let g = glow.clamp(0.0, 1.0);
    format!(
        "box-shadow: 0 0 {:.0}px rgba(249, 115, 22, {:.2}), 0 0 {:.0}px rgba(249, 115, 22, {:.2}), 0 0 {:.0}px rgba(249, 115, 22, {:.2});",
        30.0 + 20.0 * g,
        0.8 + 0.2 * g,
        60.0 + 40.0 * g,
        0.5 + 0.3 * g,
        100.0 + 50.0 * g,
        0.3 + 0.3 * g,
    )
}
