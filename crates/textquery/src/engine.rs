//! Query adapters: where the candidate text lives during evaluation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::warn;
use uuid::Uuid;

use crate::error::QueryError;
use crate::expr::{QueryExpr, TargetText};

/// Boolean match verdict between a stored query expression and a target
/// text. This is the only contract the matching engine consumes.
pub trait TextQueryAdapter: Send + Sync {
    fn matches(&self, query: &str, text: &str) -> Result<bool, QueryError>;
}

/// Scratch row storage for staged candidate texts.
///
/// Keys are chosen by the caller and must be unique per concurrent
/// evaluation; the store itself does no coordination beyond atomic
/// stage/fetch/release of individual rows.
pub trait ScratchStore: Send + Sync {
    fn stage(&self, key: &str, text: &str) -> Result<(), QueryError>;
    fn fetch(&self, key: &str) -> Result<Option<String>, QueryError>;
    fn release(&self, key: &str) -> Result<(), QueryError>;
}

/// An in-memory scratch store using a `RwLock` around a `HashMap`.
#[derive(Default)]
pub struct InMemoryScratch {
    rows: RwLock<HashMap<String, String>>,
}

impl InMemoryScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently staged rows. Zero between evaluations when every
    /// exit path released properly.
    pub fn staged_rows(&self) -> usize {
        self.rows
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl ScratchStore for InMemoryScratch {
    fn stage(&self, key: &str, text: &str) -> Result<(), QueryError> {
        self.rows
            .write()
            .map_err(|_| QueryError::scratch("poisoned lock"))?
            .insert(key.to_string(), text.to_string());
        Ok(())
    }

    fn fetch(&self, key: &str) -> Result<Option<String>, QueryError> {
        Ok(self
            .rows
            .read()
            .map_err(|_| QueryError::scratch("poisoned lock"))?
            .get(key)
            .cloned())
    }

    fn release(&self, key: &str) -> Result<(), QueryError> {
        self.rows
            .write()
            .map_err(|_| QueryError::scratch("poisoned lock"))?
            .remove(key);
        Ok(())
    }
}

/// Evaluates queries against text staged in a [`ScratchStore`].
///
/// Each call stages the candidate text under a freshly generated key, reads
/// the staged row back, and evaluates the parsed expression against what the
/// store returned. The key is unique per evaluation, never per worker or per
/// host: any coarser key would let two concurrent evaluations observe each
/// other's text and report cross matches.
///
/// The staged row is released on every exit path through a drop guard.
/// Release failures are logged and swallowed; they cannot poison later
/// evaluations because no later evaluation reuses the key.
pub struct ScratchTextEngine {
    scratch: Arc<dyn ScratchStore>,
}

impl ScratchTextEngine {
    pub fn new(scratch: Arc<dyn ScratchStore>) -> Self {
        Self { scratch }
    }

    /// Engine over a fresh in-memory scratch store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryScratch::new()))
    }
}

impl TextQueryAdapter for ScratchTextEngine {
    fn matches(&self, query: &str, text: &str) -> Result<bool, QueryError> {
        let expr = QueryExpr::parse(query)?;

        let key = Uuid::new_v4().to_string();
        self.scratch.stage(&key, text)?;
        let _guard = ScratchGuard {
            scratch: self.scratch.as_ref(),
            key: &key,
        };

        let staged = self
            .scratch
            .fetch(&key)?
            .ok_or_else(|| QueryError::scratch(format!("staged row {key} disappeared")))?;
        Ok(expr.matches(&staged))
    }
}

struct ScratchGuard<'a> {
    scratch: &'a dyn ScratchStore,
    key: &'a str,
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.scratch.release(self.key) {
            warn!(key = %self.key, error = %err, "failed to release staged scratch text");
        }
    }
}

/// Evaluates queries directly against the supplied text.
///
/// Acceptance set is identical to [`ScratchTextEngine`]; use this where the
/// backing engine can take ad hoc text and no staging is needed.
#[derive(Default)]
pub struct DirectTextEngine;

impl DirectTextEngine {
    pub fn new() -> Self {
        Self
    }
}

impl TextQueryAdapter for DirectTextEngine {
    fn matches(&self, query: &str, text: &str) -> Result<bool, QueryError> {
        let expr = QueryExpr::parse(query)?;
        Ok(expr.evaluate(&TargetText::new(text)))
    }
}
