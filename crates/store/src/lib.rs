//! Channel definitions and their storage backends.
//!
//! A *channel* is a named, user-owned filter describing content a subscriber
//! wants surfaced: accepted languages, include/exclude tag lists, a
//! trust-circle restriction, a media-kind bitmask, and a boolean full-text
//! expression. This crate owns the data model and the persistence seam; the
//! matching engine (`channel-matcher`) only ever reads channels through it.
//!
//! ## Core Types
//!
//! - [`Channel`]: the stored filter definition.
//! - [`ChannelBackend`]: storage trait with select/exists/upsert/delete.
//! - [`ChannelCondition`]: typed predicate-set for select- and
//!   exists-by-condition lookups.
//! - [`BackendConfig`]: backend selection; [`BackendConfig::in_memory`] is
//!   used for tests and ephemeral deployments.
//! - [`ChannelStore`]: owning wrapper over a boxed backend.

pub mod backend;
pub mod error;
pub mod types;

pub use crate::backend::{
    BackendConfig, ChannelBackend, ChannelCondition, ChannelStore, InMemoryBackend,
};
pub use crate::error::StoreError;
pub use crate::types::{media, parse_tag_list, Channel, ChannelId, CircleId, UserId};
