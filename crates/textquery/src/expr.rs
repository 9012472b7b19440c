//! Boolean expression tree and its evaluator.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::token::{quote_colon_terms, tokenize, QueryToken};

/// A parsed boolean query.
///
/// Terms match case-insensitively against whitespace-delimited tokens of the
/// target text (leading/trailing punctuation stripped); phrases match as
/// case-insensitive substrings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryExpr {
    Term(String),
    Phrase(String),
    Not(Box<QueryExpr>),
    And(Vec<QueryExpr>),
    Or(Vec<QueryExpr>),
}

impl QueryExpr {
    /// Parse a raw query expression, auto-quoting recognized
    /// `keyword:value` tokens first.
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let prepared = quote_colon_terms(query);
        let tokens = tokenize(&prepared)?;
        if tokens.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_or()?;
        if let Some(leftover) = parser.peek() {
            return Err(QueryError::UnexpectedToken(leftover.to_string()));
        }
        Ok(expr)
    }

    /// Evaluate against a prepared target text.
    pub fn evaluate(&self, target: &TargetText) -> bool {
        match self {
            QueryExpr::Term(term) => target.has_token(term),
            QueryExpr::Phrase(phrase) => target.has_phrase(phrase),
            QueryExpr::Not(inner) => !inner.evaluate(target),
            QueryExpr::And(parts) => parts.iter().all(|part| part.evaluate(target)),
            QueryExpr::Or(parts) => parts.iter().any(|part| part.evaluate(target)),
        }
    }

    /// Convenience: prepare `text` and evaluate in one step.
    pub fn matches(&self, text: &str) -> bool {
        self.evaluate(&TargetText::new(text))
    }
}

/// A target text prepared once per evaluation: lowercased for phrase
/// matching, tokenized for term matching.
pub struct TargetText {
    lowered: String,
    tokens: std::collections::HashSet<String>,
}

impl TargetText {
    pub fn new(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();
        Self { lowered, tokens }
    }

    fn has_token(&self, term: &str) -> bool {
        self.tokens.contains(term)
    }

    fn has_phrase(&self, phrase: &str) -> bool {
        self.lowered.contains(phrase)
    }
}

struct Parser {
    tokens: Vec<QueryToken>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&QueryToken> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<QueryToken> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_or(&mut self) -> Result<QueryExpr, QueryError> {
        let mut parts = vec![self.parse_and()?];
        while matches!(self.peek(), Some(QueryToken::Or)) {
            self.next();
            parts.push(self.parse_and()?);
        }
        Ok(collapse(parts, QueryExpr::Or))
    }

    fn parse_and(&mut self) -> Result<QueryExpr, QueryError> {
        let mut parts = vec![self.parse_unary()?];
        loop {
            match self.peek() {
                Some(QueryToken::And) => {
                    self.next();
                    parts.push(self.parse_unary()?);
                }
                // Adjacent operands without an operator: implicit AND.
                Some(
                    QueryToken::Term(_)
                    | QueryToken::Phrase(_)
                    | QueryToken::Not
                    | QueryToken::Open,
                ) => parts.push(self.parse_unary()?),
                _ => break,
            }
        }
        Ok(collapse(parts, QueryExpr::And))
    }

    fn parse_unary(&mut self) -> Result<QueryExpr, QueryError> {
        match self.next() {
            Some(QueryToken::Not) => Ok(QueryExpr::Not(Box::new(self.parse_unary()?))),
            Some(QueryToken::Term(term)) => Ok(QueryExpr::Term(term)),
            Some(QueryToken::Phrase(phrase)) => Ok(QueryExpr::Phrase(phrase)),
            Some(QueryToken::Open) => {
                let expr = self.parse_or()?;
                match self.next() {
                    Some(QueryToken::Close) => Ok(expr),
                    _ => Err(QueryError::UnbalancedParen("missing )".into())),
                }
            }
            Some(other @ (QueryToken::And | QueryToken::Or)) => {
                Err(QueryError::UnexpectedToken(other.to_string()))
            }
            Some(QueryToken::Close) => Err(QueryError::UnbalancedParen("stray )".into())),
            None => Err(QueryError::EmptyQuery),
        }
    }
}

fn collapse(mut parts: Vec<QueryExpr>, combine: fn(Vec<QueryExpr>) -> QueryExpr) -> QueryExpr {
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        combine(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(query: &str, text: &str) -> bool {
        QueryExpr::parse(query).expect("parse").matches(text)
    }

    #[test]
    fn adjacent_terms_are_implicit_and() {
        assert!(hit("rust safety", "Rust gives you memory safety."));
        assert!(!hit("rust safety", "Rust gives you speed."));
    }

    #[test]
    fn or_and_parentheses_group() {
        assert!(hit("(rocket OR probe) launch", "The probe launch succeeded"));
        assert!(!hit("(rocket OR probe) launch", "The probe landing succeeded"));
    }

    #[test]
    fn not_and_minus_negate() {
        assert!(hit("launch NOT scrub", "launch window open"));
        assert!(!hit("launch -scrub", "launch scrub announced"));
    }

    #[test]
    fn phrases_match_as_substrings() {
        assert!(hit("\"memory safety\"", "Rust: Memory Safety without GC"));
        assert!(!hit("\"memory safety\"", "safety of memory"));
    }

    #[test]
    fn terms_ignore_surrounding_punctuation() {
        assert!(hit("launch", "Liftoff! Launch, at last."));
    }

    #[test]
    fn keyword_terms_match_verbatim() {
        assert!(hit("tag:space", "filed under tag:space today"));
        assert!(!hit("tag:space", "tag space"));
    }

    #[test]
    fn malformed_expressions_are_typed_errors() {
        assert!(matches!(
            QueryExpr::parse(""),
            Err(QueryError::EmptyQuery)
        ));
        assert!(matches!(
            QueryExpr::parse("(open"),
            Err(QueryError::UnbalancedParen(_))
        ));
        assert!(matches!(
            QueryExpr::parse("a AND"),
            Err(QueryError::EmptyQuery)
        ));
        assert!(matches!(
            QueryExpr::parse("AND a"),
            Err(QueryError::UnexpectedToken(_))
        ));
        assert!(matches!(
            QueryExpr::parse("\"dangling"),
            Err(QueryError::UnbalancedQuote(_))
        ));
    }

    #[test]
    fn expression_round_trips_through_serde() {
        let expr = QueryExpr::parse("(rocket OR probe) -scrub").expect("parse");
        let json = serde_json::to_string(&expr).expect("serialize");
        let back: QueryExpr = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(expr, back);
    }
}
