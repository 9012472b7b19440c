//! In-memory collaborator implementations for tests and demo wiring.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, Utc};
use store::{CircleId, UserId};

use crate::error::DirectoryError;
use crate::traits::{CircleResolver, LanguageDirectory, UserDirectory};
use crate::types::{ContactId, EligibleUserQuery, PeerId, UserProfile};

/// A fixed user population evaluated against the platform eligibility rules.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: Vec<UserProfile>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, profile: UserProfile) -> Self {
        self.users.push(profile);
        self
    }

    pub fn push(&mut self, profile: UserProfile) {
        self.users.push(profile);
    }

    fn passes_base_rules(profile: &UserProfile) -> bool {
        profile.uid != 0
            && profile.verified
            && !profile.blocked
            && !profile.removed
            && !profile.expired
    }
}

impl UserDirectory for StaticUserDirectory {
    fn eligible_users(&self, query: &EligibleUserQuery) -> Result<Vec<UserId>, DirectoryError> {
        let cutoff = query
            .active_within_days
            .map(|days| Utc::now() - Duration::days(i64::from(days)));
        Ok(self
            .users
            .iter()
            .filter(|profile| Self::passes_base_rules(profile))
            .filter(|profile| !query.exclude_account_types.contains(&profile.account_type))
            .filter(|profile| match cutoff {
                Some(cutoff) => profile
                    .last_activity
                    .map(|seen| seen >= cutoff)
                    .unwrap_or(false),
                None => true,
            })
            .map(|profile| profile.uid)
            .collect())
    }
}

/// Fixed contact and circle tables.
#[derive(Debug, Clone, Default)]
pub struct StaticCircleResolver {
    contacts: HashMap<(PeerId, UserId), ContactId>,
    members: HashMap<CircleId, HashSet<ContactId>>,
}

impl StaticCircleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the contact record `uid` holds for `peer`.
    pub fn with_contact(mut self, peer: PeerId, uid: UserId, contact: ContactId) -> Self {
        self.contacts.insert((peer, uid), contact);
        self
    }

    pub fn with_member(mut self, circle: CircleId, contact: ContactId) -> Self {
        self.members.entry(circle).or_default().insert(contact);
        self
    }
}

impl CircleResolver for StaticCircleResolver {
    fn resolve_contact(
        &self,
        peer: PeerId,
        uid: UserId,
    ) -> Result<Option<ContactId>, DirectoryError> {
        if peer == 0 {
            return Ok(None);
        }
        Ok(self.contacts.get(&(peer, uid)).copied())
    }

    fn is_member(&self, circle: CircleId, contact: ContactId) -> Result<bool, DirectoryError> {
        Ok(self
            .members
            .get(&circle)
            .map(|members| members.contains(&contact))
            .unwrap_or(false))
    }
}

/// Fixed language configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticLanguageDirectory {
    allowed: HashSet<String>,
    wanted: HashMap<UserId, HashSet<String>>,
}

impl StaticLanguageDirectory {
    /// A directory with no platform whitelist and no per-user wanted lists.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allowed(mut self, codes: &[&str]) -> Self {
        self.allowed = codes.iter().map(|code| code.to_lowercase()).collect();
        self
    }

    pub fn with_wanted(mut self, uid: UserId, codes: &[&str]) -> Self {
        self.wanted
            .insert(uid, codes.iter().map(|code| code.to_lowercase()).collect());
        self
    }

    /// Replace a subscriber's wanted languages in place.
    pub fn set_wanted(&mut self, uid: UserId, codes: &[&str]) {
        self.wanted
            .insert(uid, codes.iter().map(|code| code.to_lowercase()).collect());
    }
}

impl LanguageDirectory for StaticLanguageDirectory {
    fn allowed_languages(&self) -> Result<HashSet<String>, DirectoryError> {
        Ok(self.allowed.clone())
    }

    fn wanted_languages(&self, uid: UserId) -> Result<HashSet<String>, DirectoryError> {
        Ok(self.wanted.get(&uid).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountType;

    #[test]
    fn base_rules_drop_unverified_blocked_and_sentinel_users() {
        let directory = StaticUserDirectory::new()
            .with_user(UserProfile::active_person(1))
            .with_user(UserProfile {
                verified: false,
                ..UserProfile::active_person(2)
            })
            .with_user(UserProfile {
                blocked: true,
                ..UserProfile::active_person(3)
            })
            .with_user(UserProfile::active_person(0));

        let eligible = directory
            .eligible_users(&EligibleUserQuery::new())
            .expect("eligible");
        assert_eq!(eligible, vec![1]);
    }

    #[test]
    fn account_type_exclusions_apply() {
        let directory = StaticUserDirectory::new()
            .with_user(UserProfile::active_person(1))
            .with_user(UserProfile::active_person(2).with_account_type(AccountType::Relay))
            .with_user(UserProfile::active_person(3).with_account_type(AccountType::Community));

        let query = EligibleUserQuery::new()
            .excluding(AccountType::Relay)
            .excluding(AccountType::Community);
        assert_eq!(directory.eligible_users(&query).expect("eligible"), vec![1]);
    }

    #[test]
    fn activity_recency_narrows_candidates() {
        let stale = UserProfile {
            last_activity: Some(Utc::now() - Duration::days(120)),
            ..UserProfile::active_person(1)
        };
        let silent = UserProfile {
            last_activity: None,
            ..UserProfile::active_person(2)
        };
        let directory = StaticUserDirectory::new()
            .with_user(stale)
            .with_user(silent)
            .with_user(UserProfile::active_person(3));

        let query = EligibleUserQuery::new().active_within_days(30);
        assert_eq!(directory.eligible_users(&query).expect("eligible"), vec![3]);
    }

    #[test]
    fn zero_peer_never_resolves() {
        let resolver = StaticCircleResolver::new()
            .with_contact(10, 1, 100)
            .with_member(5, 100);
        assert_eq!(resolver.resolve_contact(0, 1).expect("resolve"), None);
        assert_eq!(resolver.resolve_contact(10, 1).expect("resolve"), Some(100));
        assert!(resolver.is_member(5, 100).expect("member"));
        assert!(!resolver.is_member(5, 999).expect("member"));
        assert!(!resolver.is_member(6, 100).expect("member"));
    }

    #[test]
    fn wanted_languages_default_to_empty() {
        let languages = StaticLanguageDirectory::new()
            .with_allowed(&["en", "de"])
            .with_wanted(1, &["EN"]);
        assert!(languages
            .wanted_languages(1)
            .expect("wanted")
            .contains("en"));
        assert!(languages.wanted_languages(2).expect("wanted").is_empty());
    }
}
