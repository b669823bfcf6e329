use askama::Template;

use lazy_static::lazy_static;

use crate::animation::sequence;
use crate::controller::submission::Submission;

use super::PageMetadata;

/// Prefix of every exported keyframe name
const ANIMATION_PREFIX: &str = "landing";

lazy_static! {
    /// Entrance and success banner keyframes, rendered once
    static ref STYLESHEET: String = format!(
        "{}{}",
        sequence::entrance().to_css(ANIMATION_PREFIX),
        sequence::success_banner().to_css(ANIMATION_PREFIX)
    );
}

/// The landing page, rendered from one submission state
#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingPage<'a> {
    pub metadata: PageMetadata,
    pub stylesheet: &'a str,
    pub email: &'a str,
    pub error: Option<&'a str>,
    pub show_success: bool,
    pub is_loading: bool,
}

impl<'a> LandingPage<'a> {
    pub fn new(submission: &'a Submission) -> Self {
        Self {
            metadata: PageMetadata::landing(),
            stylesheet: STYLESHEET.as_str(),
            email: submission.email(),
            error: submission.error(),
            show_success: submission.show_success(),
            is_loading: submission.is_loading(),
        }
    }

    /// Show `message` inline instead of the submission's own error
    pub fn with_error(mut self, message: &'a str) -> Self {
        self.error = Some(message);
        self
    }
}
