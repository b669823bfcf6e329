//! Declarative animation timelines.
//!
//! A [`Timeline`] is a list of instant `set`s applied at mount followed by tweens, each with a
//! start offset, a duration, an easing curve and target property values. Sampling a timeline at
//! an elapsed time is pure, so the same definition drives the live [`TimelineHandle`], the
//! exported CSS keyframes and the tests.

mod css;
mod driver;
mod easing;
pub mod sequence;
mod timeline;

pub use driver::*;
pub use easing::*;
pub use timeline::*;
