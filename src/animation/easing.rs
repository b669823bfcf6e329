/// Easing curves, named after the GSAP eases the page was designed with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// Cubic deceleration
    Power2Out,
    /// Cubic acceleration then deceleration
    Power2InOut,
    /// Deceleration that overshoots the target before settling, by the given amount
    BackOut(f64),
}

impl Ease {
    /// Map linear progress in `[0, 1]` to eased progress.
    ///
    /// The result starts at 0 and ends at 1 but `BackOut` exceeds 1 in between.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::BackOut(overshoot) => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
        }
    }
}
