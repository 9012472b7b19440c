//! Boolean full-text query evaluation for channel filters.
//!
//! Channels carry a free-form boolean expression in the usual full-text
//! grammar: implicit AND between space-separated terms, `OR`/`NOT` word
//! operators, `+`/`-` prefixes, double-quoted phrases, and parentheses.
//! Recognized `keyword:value` tokens are auto-quoted before parsing so the
//! colon is treated as part of an exact phrase rather than a token split.
//!
//! The matching engine consumes this crate through [`TextQueryAdapter`],
//! which hides where the candidate text lives during evaluation:
//!
//! - [`ScratchTextEngine`] stages the text in a [`ScratchStore`] under a
//!   per-evaluation unique key, evaluates the query against the staged row,
//!   and releases the row on every exit path. This mirrors full-text
//!   primitives that can only match against *stored* rows; the unique key is
//!   what keeps concurrent evaluations from observing each other's text.
//! - [`DirectTextEngine`] evaluates in place with the identical acceptance
//!   set, for deployments whose engine takes ad hoc text.

pub mod engine;
pub mod error;
pub mod expr;
pub mod token;

pub use crate::engine::{
    DirectTextEngine, InMemoryScratch, ScratchStore, ScratchTextEngine, TextQueryAdapter,
};
pub use crate::error::QueryError;
pub use crate::expr::QueryExpr;
pub use crate::token::{quote_colon_terms, tokenize, QueryToken, BOOLEAN_KEYWORDS};
