//! Umbrella crate for the chanmatch subscription engine.
//!
//! Subscribers on a social-content platform save "channels": named filters
//! describing content they want surfaced, by language, tag lists, trust
//! circle, media kinds, and a boolean full-text query. This crate stitches
//! the pieces together so embedders get the two matching entry points with a
//! single dependency:
//!
//! - [`ChannelMatcher::exists_match`]: does any eligible subscriber's
//!   channel accept this content?
//! - [`ChannelMatcher::matching_subscribers`]: which subscribers receive
//!   this relayed content?
//!
//! The subcrates remain usable on their own: `channel-store` (model and
//! persistence seam), `channel-directory` (platform collaborators),
//! `channel-textquery` (boolean query engine), `channel-matcher` (the
//! orchestrator).

pub mod config;

pub use config::{ChanmatchConfig, ConfigLoadError, StoreBackendKind, TextEngineKind};

pub use directory::{
    AccountType, CircleResolver, ContactId, DirectoryError, EligibleUserQuery, LanguageDirectory,
    PeerId, StaticCircleResolver, StaticLanguageDirectory, StaticUserDirectory, UserDirectory,
    UserProfile,
};
pub use matcher::{
    set_match_metrics, ChannelMatcher, ContentItem, MatchError, MatchMetrics, MatchMode,
    MatcherOptions,
};
pub use store::{
    media, parse_tag_list, BackendConfig, Channel, ChannelBackend, ChannelCondition, ChannelId,
    ChannelStore, CircleId, InMemoryBackend, StoreError, UserId,
};
pub use textquery::{
    quote_colon_terms, DirectTextEngine, InMemoryScratch, QueryError, QueryExpr, ScratchStore,
    ScratchTextEngine, TextQueryAdapter,
};

use std::sync::Arc;

/// Build a channel store from configuration.
pub fn store_from_config(config: &ChanmatchConfig) -> Result<ChannelStore, StoreError> {
    match config.store.backend {
        StoreBackendKind::InMemory => ChannelStore::new(BackendConfig::in_memory()),
    }
}

/// Build the full-text adapter from configuration.
pub fn engine_from_config(config: &ChanmatchConfig) -> Arc<dyn TextQueryAdapter> {
    match config.text.engine {
        TextEngineKind::Scratch => Arc::new(ScratchTextEngine::in_memory()),
        TextEngineKind::Direct => Arc::new(DirectTextEngine::new()),
    }
}

/// Wire a matcher from configuration and the platform collaborators.
pub fn matcher_from_config(
    config: &ChanmatchConfig,
    store: Arc<ChannelStore>,
    users: Arc<dyn UserDirectory>,
    circles: Arc<dyn CircleResolver>,
    languages: Arc<dyn LanguageDirectory>,
) -> ChannelMatcher {
    ChannelMatcher::with_options(
        store,
        users,
        circles,
        languages,
        engine_from_config(config),
        MatcherOptions {
            fast_path: config.matching.fast_path,
        },
    )
}
