//! Error types produced by the channel store.

use crate::types::{ChannelId, UserId};
use thiserror::Error;

/// Errors surfaced by channel storage operations.
///
/// Backend failures are transient from the matcher's point of view: they
/// propagate to the caller, which owns the retry policy. The enum is marked
/// `#[non_exhaustive]` so new backends can add variants without breaking
/// callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// The underlying storage backend failed.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// A channel definition violated a store invariant.
    #[error("invalid channel: {0}")]
    InvalidChannel(String),

    /// No channel with this id exists for this user.
    #[error("channel {id} not found for user {uid}")]
    NotFound { uid: UserId, id: ChannelId },
}

impl StoreError {
    /// Construct a backend failure from any displayable cause.
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }
}
