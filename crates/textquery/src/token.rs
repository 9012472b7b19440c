//! Query tokenization and keyword auto-quoting.

use std::fmt;

use crate::error::QueryError;

/// Keywords whose `keyword:value` form is treated as one exact phrase.
///
/// Without auto-quoting, the boolean parser would split on the colon and
/// evaluate `tag:space` as two unrelated terms.
pub const BOOLEAN_KEYWORDS: &[&str] = &[
    "from",
    "to",
    "group",
    "tag",
    "network",
    "platform",
    "visibility",
    "language",
];

/// A single lexical token of a boolean query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    /// A bare term, lowercased.
    Term(String),
    /// A double-quoted exact phrase, lowercased.
    Phrase(String),
    And,
    Or,
    Not,
    Open,
    Close,
}

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryToken::Term(term) => write!(f, "{term}"),
            QueryToken::Phrase(phrase) => write!(f, "\"{phrase}\""),
            QueryToken::And => write!(f, "AND"),
            QueryToken::Or => write!(f, "OR"),
            QueryToken::Not => write!(f, "NOT"),
            QueryToken::Open => write!(f, "("),
            QueryToken::Close => write!(f, ")"),
        }
    }
}

/// Wrap recognized `keyword:value` tokens in double quotes.
///
/// Only unquoted occurrences are rewritten; a `+`/`-`/`!` prefix stays
/// outside the inserted quotes so operator semantics survive.
pub fn quote_colon_terms(query: &str) -> String {
    let mut out = String::with_capacity(query.len() + 8);
    let mut word = String::new();
    let mut in_quotes = false;

    for ch in query.chars() {
        if ch == '"' {
            flush_word(&mut word, &mut out);
            in_quotes = !in_quotes;
            out.push(ch);
        } else if in_quotes {
            out.push(ch);
        } else if ch.is_whitespace() || ch == '(' || ch == ')' {
            flush_word(&mut word, &mut out);
            out.push(ch);
        } else {
            word.push(ch);
        }
    }
    flush_word(&mut word, &mut out);
    out
}

fn flush_word(word: &mut String, out: &mut String) {
    if word.is_empty() {
        return;
    }
    let (prefix, body) = match word.chars().next() {
        Some(op @ ('+' | '-' | '!')) => (Some(op), &word[1..]),
        _ => (None, word.as_str()),
    };
    let quote = body.split_once(':').is_some_and(|(keyword, value)| {
        !value.is_empty() && BOOLEAN_KEYWORDS.contains(&keyword.to_ascii_lowercase().as_str())
    });
    if let Some(op) = prefix {
        out.push(op);
    }
    if quote {
        out.push('"');
        out.push_str(body);
        out.push('"');
    } else {
        out.push_str(body);
    }
    word.clear();
}

/// Tokenize a boolean query expression.
///
/// `+term` collapses to the term itself (conjunction is already the
/// default); `-term` and `!term` negate. `AND`/`OR`/`NOT` are recognized
/// case-insensitively as word operators.
pub fn tokenize(query: &str) -> Result<Vec<QueryToken>, QueryError> {
    let mut tokens = Vec::new();
    let mut chars = query.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {}
            '"' => {
                let mut phrase = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    phrase.push(c);
                }
                if !closed {
                    return Err(QueryError::UnbalancedQuote(query.to_string()));
                }
                let phrase = phrase.trim().to_lowercase();
                if !phrase.is_empty() {
                    tokens.push(QueryToken::Phrase(phrase));
                }
            }
            '(' => tokens.push(QueryToken::Open),
            ')' => tokens.push(QueryToken::Close),
            '+' => {}
            '-' | '!' => tokens.push(QueryToken::Not),
            _ => {
                let mut term = String::new();
                term.push(ch);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '(' | ')' | '"') {
                        break;
                    }
                    term.push(next);
                    chars.next();
                }
                match term.to_ascii_uppercase().as_str() {
                    "AND" => tokens.push(QueryToken::And),
                    "OR" => tokens.push(QueryToken::Or),
                    "NOT" => tokens.push(QueryToken::Not),
                    _ => tokens.push(QueryToken::Term(term.to_lowercase())),
                }
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_and_operators_are_recognized() {
        let tokens = tokenize("rust AND safety OR -unsafe").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                QueryToken::Term("rust".into()),
                QueryToken::And,
                QueryToken::Term("safety".into()),
                QueryToken::Or,
                QueryToken::Not,
                QueryToken::Term("unsafe".into()),
            ]
        );
    }

    #[test]
    fn phrases_keep_internal_whitespace() {
        let tokens = tokenize("\"memory safety\" rust").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                QueryToken::Phrase("memory safety".into()),
                QueryToken::Term("rust".into()),
            ]
        );
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert!(matches!(
            tokenize("\"dangling"),
            Err(QueryError::UnbalancedQuote(_))
        ));
    }

    #[test]
    fn plus_prefix_is_dropped_minus_negates() {
        let tokens = tokenize("+keep -drop").expect("tokenize");
        assert_eq!(
            tokens,
            vec![
                QueryToken::Term("keep".into()),
                QueryToken::Not,
                QueryToken::Term("drop".into()),
            ]
        );
    }

    #[test]
    fn recognized_keywords_are_quoted() {
        assert_eq!(quote_colon_terms("tag:space rocket"), "\"tag:space\" rocket");
        assert_eq!(
            quote_colon_terms("from:alice AND language:en"),
            "\"from:alice\" AND \"language:en\""
        );
    }

    #[test]
    fn unrecognized_or_quoted_colons_stay_untouched() {
        assert_eq!(quote_colon_terms("time:12:30"), "time:12:30");
        assert_eq!(quote_colon_terms("\"tag:space\""), "\"tag:space\"");
    }

    #[test]
    fn negated_keyword_keeps_operator_outside_quotes() {
        assert_eq!(quote_colon_terms("-tag:spoiler"), "-\"tag:spoiler\"");
    }
}
