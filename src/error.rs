use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// PostgREST error code for a unique constraint violation
pub const UNIQUE_VIOLATION: &str = "23505";

/// Coarse classification of a failed waitlist operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The email is already stored; the user can correct this
    DuplicateEmail,
    /// Network or server failure; the user should retry
    Unknown,
    /// The backend is not configured; the client degrades instead of failing
    ConfigurationMissing,
}

impl ErrorKind {
    /// Inline message presented to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "This email is already on the waitlist!",
            Self::Unknown | Self::ConfigurationMissing => "Something went wrong. Please try again.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DuplicateEmail => "duplicate_email",
            Self::Unknown => "unknown",
            Self::ConfigurationMissing => "configuration_missing",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Parsing errors
    #[error("{0}")]
    ParsingError(String),
    // Store errors
    #[error("Email is already on the waitlist")]
    DuplicateEmail,
    #[error("Store rejected the insert ({code}): {message}")]
    Store { code: String, message: String },
    #[error("Failed to decode store response: {0}")]
    Decode(String),
    // HTTP client errors
    #[error("Failed to reach the store: {0}")]
    Request(#[from] reqwest::Error),
    // Settings errors
    #[error("Missing configuration: {0}")]
    ConfigurationMissing(&'static str),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateEmail => ErrorKind::DuplicateEmail,
            Self::ConfigurationMissing(_) => ErrorKind::ConfigurationMissing,
            Self::ParsingError(_) | Self::Store { .. } | Self::Decode(_) | Self::Request(_) => {
                ErrorKind::Unknown
            }
        }
    }
}
