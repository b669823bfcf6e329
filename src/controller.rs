/// Landing page and waitlist endpoints
pub mod landing;
/// Lifecycle of one landing page view
pub mod page;
/// Waitlist form state machine
pub mod submission;
