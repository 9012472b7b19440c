use thiserror::Error;

/// Errors surfaced by directory lookups.
///
/// These are transient from the matcher's point of view and propagate to the
/// caller unchanged; the matcher performs no implicit retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DirectoryError {
    /// A lookup against the platform directory failed.
    #[error("directory lookup failure: {0}")]
    Lookup(String),

    /// The directory service is unreachable.
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

impl DirectoryError {
    pub fn lookup(message: impl Into<String>) -> Self {
        DirectoryError::Lookup(message.into())
    }
}
