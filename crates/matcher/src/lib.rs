//! # Channel Matcher (`channel-matcher`)
//!
//! ## Purpose
//!
//! `matcher` sits on top of the channel store (`channel-store`), the platform
//! collaborator seams (`channel-directory`), and the boolean text engine
//! (`channel-textquery`). Given one incoming content item, it decides which
//! subscribers' channels accept it, across a population that may number in
//! the thousands, with short-circuiting predicate evaluation.
//!
//! ## Modes
//!
//! - [`ChannelMatcher::exists_match`]: does *any* eligible subscriber's
//!   channel accept this content? Used as a cheap pre-check before heavier
//!   distribution work; returns on the first acceptance.
//! - [`ChannelMatcher::matching_subscribers`]: which subscribers should
//!   receive this relayed content? Only `publish` channels count, each user
//!   appears at most once, and the sweep covers the whole candidate set.
//!
//! ## Predicate order
//!
//! Per channel, configured predicates must all pass and are evaluated
//! cheapest first: language, circle membership, include tags, exclude tags,
//! media bitmask, and finally the full-text query. Empty predicates are
//! vacuously satisfied.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use directory::{StaticCircleResolver, StaticLanguageDirectory, StaticUserDirectory, UserProfile};
//! use matcher::{ChannelMatcher, ContentItem};
//! use store::{BackendConfig, Channel, ChannelStore};
//! use textquery::ScratchTextEngine;
//!
//! let store = Arc::new(ChannelStore::new(BackendConfig::in_memory()).expect("store"));
//! let mut channel = Channel::new(1, "astronomy");
//! channel.include_tags = "space,astronomy".into();
//! channel.publish = true;
//! store.upsert(&mut channel).expect("save");
//!
//! let users = Arc::new(StaticUserDirectory::new().with_user(UserProfile::active_person(1)));
//! let circles = Arc::new(StaticCircleResolver::new());
//! let languages = Arc::new(StaticLanguageDirectory::new().with_allowed(&["en"]));
//! let engine = Arc::new(ScratchTextEngine::in_memory());
//!
//! let matcher = ChannelMatcher::new(store, users, circles, languages, engine);
//! let content = ContentItem {
//!     search_text: "new exoplanet discovered".into(),
//!     language: "en".into(),
//!     tags: vec!["Space".into()],
//!     ..Default::default()
//! };
//! let subscribers = matcher.matching_subscribers(&content).expect("match");
//! assert_eq!(subscribers, vec![1]);
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to
//! record per-call latency and match counts. This is typically done once
//! during service startup.

pub mod engine;
pub mod metrics;
pub mod predicates;
pub mod types;

pub use crate::engine::ChannelMatcher;
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{ContentItem, MatchError, MatchMode, MatcherOptions};
