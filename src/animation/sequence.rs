//! The landing page's animation sequences.

use std::time::Duration;

use super::{Ease, Element, Props, Timeline};

/// Length of a content block's slide-in
const CONTENT_SECS: f64 = 0.8;
/// Vertical offset content blocks slide up from
const CONTENT_OFFSET: f64 = 30.0;
/// Offset at which the accents start appearing, once the content is in
const ACCENTS_AT: f64 = 1.2;
/// Offset at which the accents start their glow loop
const GLOW_AT: f64 = 2.0;

/// How long the success banner stays up before fading out, in milliseconds
pub const SUCCESS_DISPLAY_MS: u64 = 3_000;
/// Length of the success banner fade in and out, in milliseconds
pub const BANNER_FADE_MS: u64 = 400;

/// Offset at which every content block has settled
pub const CONTENT_SETTLED: Duration = Duration::from_millis(1_200);

/// The one-shot reveal sequence run when the page mounts.
///
/// The logo stamps in while the content blocks slide up, then the two accents pop in and
/// start an endless glow.
pub fn entrance() -> Timeline {
    use Element::*;

    let revealed = Props::new().opacity(1.0).y(0.0);

    Timeline::new(&Element::REVEALABLE)
        .set(&Element::CONTENT, Props::new().visible(true).y(CONTENT_OFFSET))
        .set(&[Logo], Props::new().visible(true).scale(0.3).rotation(-5.0))
        .set(&[CommandAccent], Props::new().visible(true).scale(0.8).rotation(-8.0))
        .set(&[RecordAccent], Props::new().visible(true).scale(0.8).rotation(12.0))
        // Stamp
        .to(
            Logo,
            0.0,
            0.6,
            Ease::BackOut(2.0),
            Props::new().opacity(1.0).scale(1.1).rotation(0.0),
        )
        .to(Logo, 0.6, 0.3, Ease::Power2Out, Props::new().scale(1.0))
        // Content, alongside the stamp
        .to(Eyebrow, 0.0, CONTENT_SECS, Ease::Power2Out, revealed)
        .to(Heading, 0.0, CONTENT_SECS, Ease::Power2Out, revealed)
        .to(Description, 0.2, CONTENT_SECS, Ease::Power2Out, revealed)
        .to(Form, 0.4, CONTENT_SECS, Ease::Power2Out, revealed)
        // Accents
        .to_staggered(
            &Element::ACCENTS,
            ACCENTS_AT,
            0.1,
            0.6,
            Ease::BackOut(1.7),
            Props::new().opacity(1.0).scale(1.0),
        )
        .forever(
            &Element::ACCENTS,
            GLOW_AT,
            2.0,
            Ease::Power2InOut,
            true,
            Props::new().glow(1.0),
        )
}

/// The success banner: drops in, holds, then lifts out
pub fn success_banner() -> Timeline {
    let fade = BANNER_FADE_MS as f64 / 1000.0;
    let hidden = Props::new().opacity(0.0).y(-20.0);

    Timeline::new(&[Element::SuccessBanner])
        .set(&[Element::SuccessBanner], hidden.visible(true))
        .to(
            Element::SuccessBanner,
            0.0,
            fade,
            Ease::Power2Out,
            Props::new().opacity(1.0).y(0.0),
        )
        .to(
            Element::SuccessBanner,
            SUCCESS_DISPLAY_MS as f64 / 1000.0,
            fade,
            Ease::Power2Out,
            hidden,
        )
}
