//! Platform collaborator seams consumed by the matching engine.
//!
//! The matcher does not own user accounts, contact relationships, or language
//! configuration; the surrounding platform does. This crate defines those
//! collaborators as `Send + Sync` traits so the engine can be driven by the
//! real platform services in production and by the in-memory implementations
//! in tests:
//!
//! - [`UserDirectory`]: resolves the candidate subscriber set under platform
//!   eligibility rules (verified, not blocked, not removed/expired, optional
//!   activity recency) with per-call account-type exclusions.
//! - [`CircleResolver`]: resolves a platform-wide peer identity to a
//!   subscriber-scoped contact and answers circle membership.
//! - [`LanguageDirectory`]: the platform language whitelist and each
//!   subscriber's wanted languages.

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use crate::error::DirectoryError;
pub use crate::memory::{StaticCircleResolver, StaticLanguageDirectory, StaticUserDirectory};
pub use crate::traits::{CircleResolver, LanguageDirectory, UserDirectory};
pub use crate::types::{AccountType, ContactId, EligibleUserQuery, PeerId, UserProfile};
