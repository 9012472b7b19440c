use directory::{DirectoryError, PeerId};
use serde::{Deserialize, Serialize};
use store::StoreError;
use textquery::QueryError;
use thiserror::Error;

/// Which orchestrator entry point produced an observation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Cheap any-subscriber pre-check.
    Existence,
    /// Relay fan-out across the whole candidate set.
    Fanout,
}

/// One piece of incoming content, constructed per matching call and
/// discarded after evaluation. Never persisted by this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    /// Text the full-text predicate evaluates against.
    pub search_text: String,
    /// Detected language code.
    pub language: String,
    pub tags: Vec<String>,
    /// Media kind bitmask; see [`store::media`].
    pub media_type: u32,
    /// Platform-wide identity of the author.
    pub owner: PeerId,
    /// Platform-wide identity of the resharer; `0` if not a reshare.
    pub reshare_of: PeerId,
}

impl ContentItem {
    pub fn is_reshare(&self) -> bool {
        self.reshare_of != 0
    }
}

/// Orchestrator tuning knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Whether existence mode pre-selects language-only channels through the
    /// cheap store condition before the general sweep. Survivors still run
    /// through the one per-channel evaluator, so the fast path can never
    /// accept content the general rules would reject.
    #[serde(default = "MatcherOptions::default_fast_path")]
    pub fast_path: bool,
}

impl MatcherOptions {
    pub(crate) fn default_fast_path() -> bool {
        true
    }
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            fast_path: Self::default_fast_path(),
        }
    }
}

/// Errors produced by the matching layer.
///
/// All variants are transient I/O failures from a collaborator; the caller
/// owns the retry policy. Malformed per-channel data never surfaces here;
/// it downgrades to "channel does not match" inside the sweep.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Channel store read failed.
    #[error("channel store failure: {0}")]
    Store(#[from] StoreError),

    /// Directory lookup failed.
    #[error("directory failure: {0}")]
    Directory(#[from] DirectoryError),

    /// Full-text adapter failed.
    #[error("full-text query failure: {0}")]
    Query(#[from] QueryError),
}
