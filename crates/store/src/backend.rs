//! Storage backends for channel definitions.
//!
//! [`ChannelBackend`] is the seam between the matching engine and whatever
//! actually persists channels. The in-memory implementation backs tests and
//! ephemeral deployments; production deployments plug in their own backend
//! behind the same trait.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::{Channel, ChannelId, UserId};

/// Typed predicate-set for select- and exists-by-condition lookups.
///
/// All set fields must hold for a channel to match. The emptiness
/// requirements exist for the matcher's existence fast path, which wants
/// channels whose only configured predicate is a language list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelCondition {
    /// Restrict to channels owned by this user.
    #[serde(default)]
    pub uid: Option<UserId>,
    /// Restrict to channels with this publish flag.
    #[serde(default)]
    pub publish: Option<bool>,
    /// Restrict to channels whose own language list contains this code.
    /// An empty language list never satisfies this condition.
    #[serde(default)]
    pub language: Option<String>,
    /// Require an empty include-tag list.
    #[serde(default)]
    pub no_include_tags: bool,
    /// Require an empty full-text expression.
    #[serde(default)]
    pub no_full_text_search: bool,
    /// Require no circle restriction.
    #[serde(default)]
    pub no_circle: bool,
}

impl ChannelCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uid(mut self, uid: UserId) -> Self {
        self.uid = Some(uid);
        self
    }

    pub fn with_publish(mut self, publish: bool) -> Self {
        self.publish = Some(publish);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn without_include_tags(mut self) -> Self {
        self.no_include_tags = true;
        self
    }

    pub fn without_full_text_search(mut self) -> Self {
        self.no_full_text_search = true;
        self
    }

    pub fn without_circle(mut self) -> Self {
        self.no_circle = true;
        self
    }

    /// Evaluate the condition against a single channel.
    pub fn matches(&self, channel: &Channel) -> bool {
        if let Some(uid) = self.uid {
            if channel.uid != uid {
                return false;
            }
        }
        if let Some(publish) = self.publish {
            if channel.publish != publish {
                return false;
            }
        }
        if let Some(language) = &self.language {
            if !channel
                .languages
                .iter()
                .any(|code| code.eq_ignore_ascii_case(language))
            {
                return false;
            }
        }
        if self.no_include_tags && !channel.include_tags.trim().is_empty() {
            return false;
        }
        if self.no_full_text_search && channel.has_full_text_search() {
            return false;
        }
        if self.no_circle && channel.circle != 0 {
            return false;
        }
        true
    }
}

/// Trait for a channel storage backend.
///
/// Select results are ordered by `(uid, id)` so sweeps over the channel
/// population are deterministic for identical store state.
pub trait ChannelBackend: Send + Sync {
    /// All channels owned by `uid`, ordered by id.
    fn select_by_uid(&self, uid: UserId) -> Result<Vec<Channel>, StoreError>;
    /// All channels matching the condition, ordered by `(uid, id)`.
    fn select_where(&self, condition: &ChannelCondition) -> Result<Vec<Channel>, StoreError>;
    /// Whether any channel matches the condition.
    fn exists_where(&self, condition: &ChannelCondition) -> Result<bool, StoreError>;
    /// Insert or update a channel, assigning an id when it has none.
    /// Updating requires an existing row under the same owner; ownership is
    /// immutable once set.
    fn upsert(&self, channel: &mut Channel) -> Result<ChannelId, StoreError>;
    /// Delete a channel. Returns whether a row was removed.
    fn delete(&self, uid: UserId, id: ChannelId) -> Result<bool, StoreError>;
}

/// Configuration for selecting and building a backend.
#[derive(Clone, Debug, Default)]
pub enum BackendConfig {
    /// In-memory map, for tests and ephemeral matching.
    #[default]
    InMemory,
}

impl BackendConfig {
    /// Create an in-memory backend configuration.
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    /// Build the backend for this configuration.
    pub fn build(&self) -> Result<Box<dyn ChannelBackend>, StoreError> {
        match self {
            BackendConfig::InMemory => Ok(Box::new(InMemoryBackend::new())),
        }
    }
}

/// Owning wrapper over a boxed backend.
///
/// The matcher holds this behind an `Arc` and only calls the read-side
/// operations; upsert/delete serve the owning user's CRUD path and test
/// population.
pub struct ChannelStore {
    backend: Box<dyn ChannelBackend>,
}

impl ChannelStore {
    /// Build a store from a backend configuration.
    pub fn new(config: BackendConfig) -> Result<Self, StoreError> {
        Ok(Self {
            backend: config.build()?,
        })
    }

    /// Wrap an existing backend.
    pub fn with_backend(backend: Box<dyn ChannelBackend>) -> Self {
        Self { backend }
    }

    pub fn select_by_uid(&self, uid: UserId) -> Result<Vec<Channel>, StoreError> {
        self.backend.select_by_uid(uid)
    }

    pub fn select_where(&self, condition: &ChannelCondition) -> Result<Vec<Channel>, StoreError> {
        self.backend.select_where(condition)
    }

    pub fn exists_where(&self, condition: &ChannelCondition) -> Result<bool, StoreError> {
        self.backend.exists_where(condition)
    }

    pub fn upsert(&self, channel: &mut Channel) -> Result<ChannelId, StoreError> {
        self.backend.upsert(channel)
    }

    pub fn delete(&self, uid: UserId, id: ChannelId) -> Result<bool, StoreError> {
        self.backend.delete(uid, id)
    }
}

/// An in-memory backend using a `RwLock` around a `BTreeMap`.
///
/// The map is keyed by `(uid, id)` so iteration order matches the ordering
/// contract of [`ChannelBackend`] without a sort.
pub struct InMemoryBackend {
    channels: RwLock<BTreeMap<(UserId, ChannelId), Channel>>,
    next_id: AtomicU64,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelBackend for InMemoryBackend {
    fn select_by_uid(&self, uid: UserId) -> Result<Vec<Channel>, StoreError> {
        let guard = self
            .channels
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard
            .range((uid, 0)..=(uid, ChannelId::MAX))
            .map(|(_, channel)| channel.clone())
            .collect())
    }

    fn select_where(&self, condition: &ChannelCondition) -> Result<Vec<Channel>, StoreError> {
        let guard = self
            .channels
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard
            .values()
            .filter(|channel| condition.matches(channel))
            .cloned()
            .collect())
    }

    fn exists_where(&self, condition: &ChannelCondition) -> Result<bool, StoreError> {
        let guard = self
            .channels
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.values().any(|channel| condition.matches(channel)))
    }

    fn upsert(&self, channel: &mut Channel) -> Result<ChannelId, StoreError> {
        if channel.uid == 0 {
            return Err(StoreError::InvalidChannel(
                "channel must have an owning user".into(),
            ));
        }
        let mut guard = self
            .channels
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        if channel.id == 0 {
            channel.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        } else if !guard.contains_key(&(channel.uid, channel.id)) {
            return Err(StoreError::NotFound {
                uid: channel.uid,
                id: channel.id,
            });
        }
        guard.insert((channel.uid, channel.id), channel.clone());
        Ok(channel.id)
    }

    fn delete(&self, uid: UserId, id: ChannelId) -> Result<bool, StoreError> {
        let mut guard = self
            .channels
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.remove(&(uid, id)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(backend: &InMemoryBackend, uid: UserId, label: &str) -> Channel {
        let mut channel = Channel::new(uid, label);
        backend.upsert(&mut channel).expect("upsert");
        channel
    }

    #[test]
    fn upsert_assigns_distinct_ids() {
        let backend = InMemoryBackend::new();
        let a = saved(&backend, 1, "first");
        let b = saved(&backend, 1, "second");
        assert_ne!(a.id, 0);
        assert_ne!(b.id, 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn upsert_rejects_unowned_channel() {
        let backend = InMemoryBackend::new();
        let mut channel = Channel::new(0, "orphan");
        assert!(matches!(
            backend.upsert(&mut channel),
            Err(StoreError::InvalidChannel(_))
        ));
    }

    #[test]
    fn update_requires_existing_row_under_same_owner() {
        let backend = InMemoryBackend::new();
        let mut channel = saved(&backend, 1, "mine");

        channel.label = "renamed".into();
        backend.upsert(&mut channel).expect("update in place");

        // A different owner cannot claim the same id.
        let mut stolen = channel.clone();
        stolen.uid = 2;
        assert!(matches!(
            backend.upsert(&mut stolen),
            Err(StoreError::NotFound { uid: 2, .. })
        ));
    }

    #[test]
    fn select_by_uid_is_ordered_and_scoped() {
        let backend = InMemoryBackend::new();
        let a = saved(&backend, 1, "a");
        let b = saved(&backend, 1, "b");
        saved(&backend, 2, "other");

        let mine = backend.select_by_uid(1).expect("select");
        assert_eq!(
            mine.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![a.id, b.id]
        );
    }

    #[test]
    fn condition_select_and_exists_agree() {
        let backend = InMemoryBackend::new();
        let mut lang_only = Channel::new(1, "english");
        lang_only.languages = vec!["en".into()];
        backend.upsert(&mut lang_only).expect("upsert");

        let mut tagged = Channel::new(2, "tagged");
        tagged.languages = vec!["en".into()];
        tagged.include_tags = "space".into();
        backend.upsert(&mut tagged).expect("upsert");

        let condition = ChannelCondition::new()
            .with_language("en")
            .without_include_tags()
            .without_full_text_search()
            .without_circle();

        let hits = backend.select_where(&condition).expect("select");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, lang_only.id);
        assert!(backend.exists_where(&condition).expect("exists"));

        let none = ChannelCondition::new().with_language("fr");
        assert!(!backend.exists_where(&none).expect("exists"));
    }

    #[test]
    fn language_condition_is_case_insensitive() {
        let mut channel = Channel::new(1, "english");
        channel.languages = vec!["EN".into()];
        assert!(ChannelCondition::new().with_language("en").matches(&channel));
    }

    #[test]
    fn delete_reports_whether_row_existed() {
        let backend = InMemoryBackend::new();
        let channel = saved(&backend, 1, "gone");
        assert!(backend.delete(1, channel.id).expect("delete"));
        assert!(!backend.delete(1, channel.id).expect("delete again"));
    }
}
