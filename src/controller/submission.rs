use std::time::Duration;

use thiserror::Error;

use tokio::time::Instant;

use crate::animation::sequence::{BANNER_FADE_MS, SUCCESS_DISPLAY_MS};
use crate::client::WaitlistStore;
use crate::domain::{EmailAddress, WaitlistEntry};
use crate::error::{ErrorKind, Result};

/// How long after a success the confirmation is dismissed: the display window plus the fade out
pub const SUCCESS_WINDOW: Duration = Duration::from_millis(SUCCESS_DISPLAY_MS + BANNER_FADE_MS);

/// Where a submission stands
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Success(WaitlistEntry),
    Failed(ErrorKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("A submission is already in flight")]
    InFlight,
    #[error("{0}")]
    Invalid(String),
}

/// State machine behind the waitlist form.
///
/// `Idle -> Submitting -> Success | Failed`. A failure returns to `Idle` on the next edit and
/// can be resubmitted directly. A success returns to `Idle` on [`Submission::reset`] or once
/// [`SUCCESS_WINDOW`] has passed. The loading, error and success flags are all derived from
/// the single phase, so a terminal phase can never be loading.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    email: String,
    phase: Phase,
    hide_success_at: Option<Instant>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the email input
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether the submit button should be disabled
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    /// The inline error message, if the last submission failed
    pub fn error(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Failed(kind) => Some(kind.message()),
            _ => None,
        }
    }

    pub fn show_success(&self) -> bool {
        matches!(self.phase, Phase::Success(_))
    }

    /// When a shown success will be dismissed
    pub fn success_deadline(&self) -> Option<Instant> {
        self.hide_success_at
    }

    /// The email input changed. Ignored while submitting, since the input is disabled.
    pub fn input(&mut self, value: impl Into<String>) {
        if self.is_loading() {
            return;
        }
        self.email = value.into();
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Idle;
        }
    }

    /// Validate the input and enter `Submitting`, yielding the address to persist.
    ///
    /// Nothing changes when rejected, so the caller must not contact the store.
    pub fn begin_submit(&mut self) -> std::result::Result<EmailAddress, SubmitRejected> {
        if self.is_loading() {
            return Err(SubmitRejected::InFlight);
        }
        let email = self
            .email
            .parse::<EmailAddress>()
            .map_err(|e| SubmitRejected::Invalid(e.to_string()))?;

        self.phase = Phase::Submitting;
        self.hide_success_at = None;
        Ok(email)
    }

    /// Apply the outcome of the store call started by [`Submission::begin_submit`]
    pub fn complete(&mut self, result: Result<WaitlistEntry>, now: Instant) {
        if !self.is_loading() {
            tracing::warn!("Ignoring a submission result with no submission in flight");
            return;
        }
        match result {
            Ok(entry) => {
                self.email.clear();
                self.phase = Phase::Success(entry);
                self.hide_success_at = Some(now + SUCCESS_WINDOW);
            }
            Err(error) => {
                tracing::warn!(
                    error.kind = %error.kind(),
                    error.cause_chain = ?error,
                    "Waitlist submission failed"
                );
                self.phase = Phase::Failed(error.kind());
            }
        }
    }

    /// Submit the current input to `store`: one store call at most, none when rejected
    #[tracing::instrument(name = "Submit waitlist form", skip(self, store), fields(email = %self.email))]
    pub async fn submit<S>(&mut self, store: &S) -> std::result::Result<(), SubmitRejected>
    where
        S: WaitlistStore + ?Sized,
    {
        let email = self.begin_submit()?;
        let result = store.add(&email).await;
        self.complete(result, Instant::now());
        Ok(())
    }

    /// Fire the success auto-hide if it is due. Returns whether the state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.hide_success_at {
            Some(deadline) if now >= deadline => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Dismiss a shown success ("add another")
    pub fn reset(&mut self) {
        if self.show_success() {
            self.phase = Phase::Idle;
        }
        self.hide_success_at = None;
    }

    /// Drop any pending timer, leaving the phase as is
    pub fn cancel_timers(&mut self) {
        self.hide_success_at = None;
    }
}
