//! Token values and token pairs.
//!
//! A token carries both its vocabulary id and its visible text. Two tokens
//! are equal only when both match, which is what merge-rule lookup relies on.

use compact_str::CompactString;
use serde::Serialize;
use std::fmt;

/// Identifier of a token: a vocabulary index, or one of the negative
/// sentinels reserved for special tokens.
pub type TokenId = i64;

/// Sentinel id of the beginning-of-sequence token.
pub const BOS_TOKEN_ID: TokenId = -4_345_683;
/// Sentinel id of the end-of-sequence token.
pub const EOS_TOKEN_ID: TokenId = -4_542_291;
/// Sentinel id of the unknown token.
pub const UNK_TOKEN_ID: TokenId = -5_590_603;

/// Whether `id` is one of the special-token sentinels.
#[inline]
pub fn is_sentinel_id(id: TokenId) -> bool {
    id == BOS_TOKEN_ID || id == EOS_TOKEN_ID || id == UNK_TOKEN_ID
}

/// A single token: vocabulary id plus its visible-string text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    /// Vocabulary id, or a special-token sentinel
    pub id: TokenId,
    /// Visible text (byte-remapped), or raw text for special tokens
    pub text: CompactString,
}

impl Token {
    /// Create a new token.
    pub fn new(id: TokenId, text: impl Into<CompactString>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Whether this token is a special-token sentinel (BOS, EOS or UNK).
    #[inline]
    pub fn is_special(&self) -> bool {
        is_sentinel_id(self.id)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.id, self.text.as_str())
    }
}

/// An ordered pair of adjacent tokens, used as a merge-rule key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenPair {
    pub first: Token,
    pub second: Token,
}

impl TokenPair {
    /// Create a new pair.
    pub fn new(first: Token, second: Token) -> Self {
        Self { first, second }
    }

    /// Whether `left` followed by `right` is exactly this pair.
    #[inline]
    pub fn matches(&self, left: &Token, right: &Token) -> bool {
        self.first == *left && self.second == *right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_needs_id_and_text() {
        let a = Token::new(1, "a");
        assert_eq!(a, Token::new(1, "a"));
        assert_ne!(a, Token::new(2, "a"));
        assert_ne!(a, Token::new(1, "b"));
    }

    #[test]
    fn test_sentinels_are_distinct_and_negative() {
        let ids = [BOS_TOKEN_ID, EOS_TOKEN_ID, UNK_TOKEN_ID];
        for (i, a) in ids.iter().enumerate() {
            assert!(*a < 0);
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(Token::new(UNK_TOKEN_ID, "<unk>").is_special());
        assert!(!Token::new(0, "!").is_special());
    }

    #[test]
    fn test_serialize_to_json() {
        let json = serde_json::to_string(&Token::new(16, "Ġworld")).unwrap();
        assert_eq!(json, r#"{"id":16,"text":"Ġworld"}"#);
    }

    #[test]
    fn test_pair_matches() {
        let pair = TokenPair::new(Token::new(0, "a"), Token::new(1, "b"));
        assert!(pair.matches(&Token::new(0, "a"), &Token::new(1, "b")));
        assert!(!pair.matches(&Token::new(1, "b"), &Token::new(0, "a")));
    }
}
