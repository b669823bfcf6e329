mod waitlist_client;

pub use waitlist_client::*;

use async_trait::async_trait;

use crate::domain::{EmailAddress, WaitlistEntry};
use crate::error::Result;

/// Persistence seam for waitlist submissions
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Insert one email, returning the stored row
    async fn add(&self, email: &EmailAddress) -> Result<WaitlistEntry>;
}
