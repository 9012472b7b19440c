//! Account and query types shared by the directory seams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::UserId;

/// Platform-wide identity of a content author or resharer.
///
/// Distinct from [`UserId`]: a peer may or may not have a local subscriber
/// account, and circle membership is resolved per subscriber via
/// [`CircleResolver::resolve_contact`](crate::CircleResolver::resolve_contact).
/// `0` is the "no peer" sentinel and never resolves.
pub type PeerId = u64;

/// Subscriber-scoped contact identifier, the unit of circle membership.
pub type ContactId = u64;

/// Account classification used for candidate filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Person,
    Organisation,
    News,
    Community,
    Relay,
}

/// Per-call refinement of the eligible-user set.
///
/// The base eligibility rules (verified, not blocked, not removed/expired)
/// are platform configuration and always apply; this query only narrows the
/// result further.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EligibleUserQuery {
    /// Account types excluded from the candidate set. Relay fan-out uses this
    /// to keep relay and community accounts out of their own redistribution
    /// loops.
    #[serde(default)]
    pub exclude_account_types: Vec<AccountType>,
    /// When set, only users active within this many days are candidates.
    #[serde(default)]
    pub active_within_days: Option<u32>,
}

impl EligibleUserQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn excluding(mut self, account_type: AccountType) -> Self {
        self.exclude_account_types.push(account_type);
        self
    }

    pub fn active_within_days(mut self, days: u32) -> Self {
        self.active_within_days = Some(days);
        self
    }
}

/// A subscriber profile as seen by the in-memory directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub uid: UserId,
    pub account_type: AccountType,
    pub verified: bool,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// A verified, unblocked personal account, the common case in tests.
    pub fn active_person(uid: UserId) -> Self {
        Self {
            uid,
            account_type: AccountType::Person,
            verified: true,
            blocked: false,
            removed: false,
            expired: false,
            last_activity: Some(Utc::now()),
        }
    }

    pub fn with_account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }
}
