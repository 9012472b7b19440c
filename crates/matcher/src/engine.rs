use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use directory::{
    AccountType, CircleResolver, EligibleUserQuery, LanguageDirectory, UserDirectory,
};
use store::{Channel, ChannelCondition, ChannelStore, UserId};
use textquery::TextQueryAdapter;

use crate::metrics::metrics_recorder;
use crate::predicates;
use crate::types::{ContentItem, MatchError, MatchMode, MatcherOptions};


/// Matching orchestrator over the channel population.
///
/// Stateless across calls: every invocation is a pure function of its inputs
/// and the collaborators' state, so any number of workers may evaluate
/// different content items concurrently against the same instance.
pub struct ChannelMatcher {
    store: Arc<ChannelStore>,
    users: Arc<dyn UserDirectory>,
    circles: Arc<dyn CircleResolver>,
    languages: Arc<dyn LanguageDirectory>,
    text: Arc<dyn TextQueryAdapter>,
    options: MatcherOptions,
}

impl ChannelMatcher {
    /// Construct a matcher with default options.
    pub fn new(
        store: Arc<ChannelStore>,
        users: Arc<dyn UserDirectory>,
        circles: Arc<dyn CircleResolver>,
        languages: Arc<dyn LanguageDirectory>,
        text: Arc<dyn TextQueryAdapter>,
    ) -> Self {
        Self::with_options(store, users, circles, languages, text, MatcherOptions::default())
    }

    /// Construct a matcher with explicit options.
    pub fn with_options(
        store: Arc<ChannelStore>,
        users: Arc<dyn UserDirectory>,
        circles: Arc<dyn CircleResolver>,
        languages: Arc<dyn LanguageDirectory>,
        text: Arc<dyn TextQueryAdapter>,
        options: MatcherOptions,
    ) -> Self {
        Self {
            store,
            users,
            circles,
            languages,
            text,
            options,
        }
    }

    /// Whether any eligible subscriber's channel accepts this content.
    ///
    /// Returns on the first acceptance; publish flags are not consulted in
    /// this mode.
    pub fn exists_match(&self, content: &ContentItem) -> Result<bool, MatchError> {
        let start = Instant::now();
        let result = self.exists_inner(content);
        if let (Some(recorder), Ok(found)) = (metrics_recorder(), &result) {
            recorder.record_match(&MatchMode::Existence, start.elapsed(), usize::from(*found));
        }
        result
    }

    /// Subscribers whose `publish` channels accept this relayed content.
    ///
    /// Each user appears at most once, in insertion order of first
    /// acceptance; relay and community accounts are excluded from the
    /// candidate set to keep redistribution out of its own loop.
    pub fn matching_subscribers(&self, content: &ContentItem) -> Result<Vec<UserId>, MatchError> {
        let start = Instant::now();
        let result = self.fanout_inner(content);
        if let (Some(recorder), Ok(matched)) = (metrics_recorder(), &result) {
            recorder.record_match(&MatchMode::Fanout, start.elapsed(), matched.len());
        }
        result
    }

    fn exists_inner(&self, content: &ContentItem) -> Result<bool, MatchError> {
        if !self.language_allowed(content)? {
            return Ok(false);
        }

        let candidates = self.users.eligible_users(&EligibleUserQuery::new())?;

        if self.options.fast_path {
            // Cheap pre-selection: channels whose only configured predicate
            // can be a language list. Survivors still run through the same
            // per-channel evaluator as the general sweep.
            let condition = ChannelCondition::new()
                .with_language(content.language.to_lowercase())
                .without_include_tags()
                .without_full_text_search()
                .without_circle();
            let candidate_set: HashSet<UserId> = candidates.iter().copied().collect();
            for channel in self.store.select_where(&condition)? {
                if !candidate_set.contains(&channel.uid) {
                    continue;
                }
                if self.channel_accepts(&channel, content)? {
                    return Ok(true);
                }
            }
        }

        for &uid in &candidates {
            if uid == 0 {
                continue;
            }
            for channel in self.store.select_by_uid(uid)? {
                if self.channel_accepts(&channel, content)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn fanout_inner(&self, content: &ContentItem) -> Result<Vec<UserId>, MatchError> {
        if !self.language_allowed(content)? {
            return Ok(Vec::new());
        }

        let query = EligibleUserQuery::new()
            .excluding(AccountType::Relay)
            .excluding(AccountType::Community);

        let mut matched = Vec::new();
        for uid in self.users.eligible_users(&query)? {
            if uid == 0 {
                continue;
            }
            for channel in self.store.select_by_uid(uid)? {
                if !channel.publish {
                    continue;
                }
                if self.channel_accepts(&channel, content)? {
                    matched.push(uid);
                    break;
                }
            }
        }
        Ok(matched)
    }

    /// Platform-level language gate shared by both modes.
    fn language_allowed(&self, content: &ContentItem) -> Result<bool, MatchError> {
        let allowed = self.languages.allowed_languages()?;
        if allowed.is_empty() || allowed.contains(&content.language.to_lowercase()) {
            return Ok(true);
        }
        debug!(
            language = %content.language,
            "content language outside the platform whitelist, no channel can match"
        );
        Ok(false)
    }

    /// Evaluate one channel against the content, cheapest predicate first.
    fn channel_accepts(&self, channel: &Channel, content: &ContentItem) -> Result<bool, MatchError> {
        let language_ok = if channel.languages.is_empty() {
            let wanted = self.languages.wanted_languages(channel.uid)?;
            predicates::wanted_language_accepts(&wanted, &content.language)
        } else {
            predicates::language_in_list(&channel.languages, &content.language)
        };
        if !language_ok {
            return Ok(false);
        }

        if !self.circle_accepts(channel, content)? {
            return Ok(false);
        }

        if !predicates::include_tags_accept(&channel.include_tag_list(), &content.tags) {
            return Ok(false);
        }
        if !predicates::exclude_tags_accept(&channel.exclude_tag_list(), &content.tags) {
            return Ok(false);
        }
        if !predicates::media_accepts(channel.media_type, content.media_type) {
            return Ok(false);
        }

        if channel.has_full_text_search() {
            match self.text.matches(&channel.full_text_search, &content.search_text) {
                Ok(hit) => {
                    if !hit {
                        return Ok(false);
                    }
                }
                Err(err) if err.is_parse() => {
                    warn!(
                        uid = channel.uid,
                        channel = channel.id,
                        error = %err,
                        "skipping channel with malformed full-text expression"
                    );
                    return Ok(false);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(true)
    }

    /// Circle gate: the owner or the resharer must resolve to a member.
    fn circle_accepts(&self, channel: &Channel, content: &ContentItem) -> Result<bool, MatchError> {
        if channel.circle == 0 {
            return Ok(true);
        }
        for peer in [content.owner, content.reshare_of] {
            if peer == 0 {
                continue;
            }
            if let Some(contact) = self.circles.resolve_contact(peer, channel.uid)? {
                if self.circles.is_member(channel.circle, contact)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
