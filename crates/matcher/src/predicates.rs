//! Pure per-predicate decision functions.
//!
//! Each function takes the channel's stored value and the content item's
//! corresponding attribute. Empty/zero channel values are vacuously
//! satisfied; the orchestrator combines configured predicates with logical
//! AND.

use std::collections::HashSet;

/// Non-empty channel language list: membership, case-insensitive.
pub fn language_in_list(list: &[String], language: &str) -> bool {
    list.iter().any(|code| code.eq_ignore_ascii_case(language))
}

/// Fallback for channels without their own language list: membership in the
/// subscriber's wanted languages. An empty wanted set places no restriction.
pub fn wanted_language_accepts(wanted: &HashSet<String>, language: &str) -> bool {
    wanted.is_empty() || wanted.contains(&language.to_lowercase())
}

/// At least one content tag appears in the include list.
pub fn include_tags_accept(include: &[String], tags: &[String]) -> bool {
    include.is_empty() || tags.iter().any(|tag| include.contains(&tag.to_lowercase()))
}

/// No content tag appears in the exclude list.
pub fn exclude_tags_accept(exclude: &[String], tags: &[String]) -> bool {
    exclude.is_empty() || !tags.iter().any(|tag| exclude.contains(&tag.to_lowercase()))
}

/// Bitmask intersection; a zero channel mask places no restriction.
pub fn media_accepts(channel_mask: u32, content_mask: u32) -> bool {
    channel_mask == 0 || channel_mask & content_mask != 0
}
