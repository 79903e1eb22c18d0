//! Key sanitizing and SQL `LIKE` pattern helpers.
//!
//! `sanitize_key` reduces arbitrary input to a key-like token
//! (`[a-z0-9_-]`). The `LIKE` helpers build the patterns bound into the
//! field-use query and let non-SQL stores evaluate them with the same
//! semantics MySQL applies under its default case-insensitive collation.

/// Value pattern for rows the custom-fields framework uses to store field
/// key references. `_` is a `LIKE` wildcard here, not a literal underscore.
pub const REFERENCE_VALUE_PATTERN: &str = "%field_%";

/// Escape character recognised in `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Lowercase the input and drop everything outside `[a-z0-9_-]`.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Escape `LIKE` metacharacters so `raw` only matches itself.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// `%<escaped>%`, which matches any text containing `raw` as a substring.
pub fn contains_pattern(raw: &str) -> String {
    format!("%{}%", escape_like(raw))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LikeToken {
    AnySequence,
    AnyChar,
    Literal(char),
}

/// A compiled `LIKE` pattern, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct LikePattern {
    tokens: Vec<LikeToken>,
}

impl LikePattern {
    pub fn new(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                '%' => LikeToken::AnySequence,
                '_' => LikeToken::AnyChar,
                LIKE_ESCAPE => match chars.next() {
                    Some(escaped) => LikeToken::Literal(fold(escaped)),
                    // trailing escape matches itself
                    None => LikeToken::Literal(LIKE_ESCAPE),
                },
                other => LikeToken::Literal(fold(other)),
            };
            tokens.push(token);
        }
        Self { tokens }
    }

    pub fn matches(&self, text: &str) -> bool {
        let text: Vec<char> = text.chars().map(fold).collect();
        let tokens = &self.tokens;

        let (mut p, mut t) = (0usize, 0usize);
        // (token index of the last `%`, text index it is currently absorbing up to)
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match tokens.get(p) {
                Some(LikeToken::AnySequence) => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                Some(LikeToken::AnyChar) => {
                    p += 1;
                    t += 1;
                }
                Some(LikeToken::Literal(c)) if *c == text[t] => {
                    p += 1;
                    t += 1;
                }
                _ => match backtrack {
                    Some((star, absorbed)) => {
                        p = star + 1;
                        t = absorbed + 1;
                        backtrack = Some((star, absorbed + 1));
                    }
                    None => return false,
                },
            }
        }

        tokens[p..].iter().all(|t| *t == LikeToken::AnySequence)
    }
}

fn fold(c: char) -> char {
    c.to_ascii_lowercase()
}
