use thiserror::Error;

/// Errors produced while parsing or evaluating a boolean query.
///
/// Parse failures describe a malformed *stored* expression and are
/// recoverable for the caller (a channel with a broken expression simply
/// cannot match); scratch failures are I/O and propagate as transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryError {
    #[error("empty query expression")]
    EmptyQuery,

    #[error("unbalanced quote in query: {0}")]
    UnbalancedQuote(String),

    #[error("unbalanced parenthesis in query: {0}")]
    UnbalancedParen(String),

    #[error("unexpected token in query: {0}")]
    UnexpectedToken(String),

    /// Staging, fetching, or releasing scratch text failed.
    #[error("scratch staging failure: {0}")]
    Scratch(String),
}

impl QueryError {
    /// Whether this error describes a malformed expression rather than an
    /// I/O failure. Malformed expressions belong to one stored channel and
    /// must not abort a population sweep.
    pub fn is_parse(&self) -> bool {
        !matches!(self, QueryError::Scratch(_))
    }

    pub fn scratch(message: impl Into<String>) -> Self {
        QueryError::Scratch(message.into())
    }
}
