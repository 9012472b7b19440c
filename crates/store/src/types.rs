//! Core data model for subscription channels.
//!
//! These types are serde-friendly so channel definitions can cross process
//! boundaries (API handlers, background distribution workers) unchanged. The
//! matcher never mutates a [`Channel`]; all writes go through the owning
//! user's CRUD path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a subscriber account.
pub type UserId = u64;

/// Identifier of a channel, unique per owning user. `0` before first save.
pub type ChannelId = u64;

/// Identifier of a trust circle. `0` means "no circle restriction".
pub type CircleId = u64;

/// Media kind bitmask values carried by content items and channel filters.
///
/// A channel mask of `0` places no restriction on media kinds.
pub mod media {
    pub const IMAGE: u32 = 1 << 0;
    pub const VIDEO: u32 = 1 << 1;
    pub const AUDIO: u32 = 1 << 2;
    pub const DOCUMENT: u32 = 1 << 3;
}

/// A named, user-owned content filter.
///
/// Every optional predicate is vacuously satisfied when empty/zero: a channel
/// with all predicates empty accepts any content from an eligible candidate
/// (relay distribution additionally requires [`publish`](Channel::publish)).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    /// Assigned by the backend on first save; `0` for unsaved channels.
    #[serde(default)]
    pub id: ChannelId,
    /// Owning subscriber. Immutable once the channel is saved.
    pub uid: UserId,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Opaque credential string; never evaluated by the matcher.
    #[serde(default)]
    pub access_key: String,
    /// Trust-circle restriction; `0` means no restriction.
    #[serde(default)]
    pub circle: CircleId,
    /// Comma-separated lowercase tag list; empty means no restriction.
    #[serde(default)]
    pub include_tags: String,
    /// Comma-separated lowercase tag list; empty means no restriction.
    #[serde(default)]
    pub exclude_tags: String,
    /// Boolean query expression; empty means no restriction.
    #[serde(default)]
    pub full_text_search: String,
    /// Media kind bitmask; `0` means no restriction.
    #[serde(default)]
    pub media_type: u32,
    /// Accepted language codes. Empty defers to the subscriber's globally
    /// configured wanted languages.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Whether this channel receives redistributed/relayed content, not just
    /// originally-authored content.
    #[serde(default)]
    pub publish: bool,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

impl Channel {
    /// Create an unsaved channel with all predicates empty.
    pub fn new(uid: UserId, label: impl Into<String>) -> Self {
        Self {
            id: 0,
            uid,
            label: label.into(),
            description: String::new(),
            access_key: String::new(),
            circle: 0,
            include_tags: String::new(),
            exclude_tags: String::new(),
            full_text_search: String::new(),
            media_type: 0,
            languages: Vec::new(),
            publish: false,
            created: Utc::now(),
        }
    }

    /// Normalized include-tag list.
    pub fn include_tag_list(&self) -> Vec<String> {
        parse_tag_list(&self.include_tags)
    }

    /// Normalized exclude-tag list.
    pub fn exclude_tag_list(&self) -> Vec<String> {
        parse_tag_list(&self.exclude_tags)
    }

    /// Whether the channel carries a full-text restriction.
    pub fn has_full_text_search(&self) -> bool {
        !self.full_text_search.trim().is_empty()
    }
}

/// Split a comma-separated tag list into trimmed, lowercased tags.
///
/// Stray separators and empty segments are dropped rather than rejected, so a
/// sloppily stored list degrades to the tags it does contain instead of
/// failing the whole channel.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}
