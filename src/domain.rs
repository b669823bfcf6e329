mod email_address;
mod waitlist_entry;

pub use email_address::*;
pub use waitlist_entry::*;
