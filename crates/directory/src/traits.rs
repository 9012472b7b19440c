//! Collaborator traits implemented by the surrounding platform.

use std::collections::HashSet;

use store::{CircleId, UserId};

use crate::error::DirectoryError;
use crate::types::{ContactId, EligibleUserQuery, PeerId};

/// Resolves the candidate subscriber set.
pub trait UserDirectory: Send + Sync {
    /// User identities passing the platform eligibility rules, narrowed by
    /// the query. Order must be deterministic for identical directory state.
    fn eligible_users(&self, query: &EligibleUserQuery) -> Result<Vec<UserId>, DirectoryError>;
}

/// Resolves peer identities to subscriber-scoped contacts and answers circle
/// membership.
pub trait CircleResolver: Send + Sync {
    /// The contact record `uid` holds for `peer`, when one exists. A zero
    /// peer never resolves.
    fn resolve_contact(
        &self,
        peer: PeerId,
        uid: UserId,
    ) -> Result<Option<ContactId>, DirectoryError>;

    /// Whether `contact` belongs to `circle`.
    fn is_member(&self, circle: CircleId, contact: ContactId) -> Result<bool, DirectoryError>;
}

/// Platform language configuration.
pub trait LanguageDirectory: Send + Sync {
    /// The platform-level language whitelist. An empty set means the
    /// platform places no restriction.
    fn allowed_languages(&self) -> Result<HashSet<String>, DirectoryError>;

    /// The languages `uid` has globally configured as wanted. An empty set
    /// means the subscriber accepts any language.
    fn wanted_languages(&self, uid: UserId) -> Result<HashSet<String>, DirectoryError>;
}
