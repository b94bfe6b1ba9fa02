//! Vocabulary storage and lookup.
//!
//! The vocabulary maps visible strings to ids using `AHashMap` for fast
//! lookups and `CompactString` keys, since most entries are short. It is
//! immutable once built.

use crate::core::token::{Token, TokenId, BOS_TOKEN_ID, EOS_TOKEN_ID, UNK_TOKEN_ID};
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use tracing::warn;

/// Forward mapping: visible string -> ID
pub type Vocab = AHashMap<CompactString, TokenId>;

/// Reverse mapping: ID -> visible string
pub type VocabR = AHashMap<TokenId, CompactString>;

/// Vocabulary with forward and reverse mappings.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    vocab: Vocab,
    vocab_r: VocabR,
    special: SpecialTokens,
}

impl Vocabulary {
    /// Build a vocabulary from `(visible string, id)` entries.
    ///
    /// Ids must be non-negative so they never collide with the special-token
    /// sentinels. Ids need not be unique; when several strings share an id the
    /// reverse mapping keeps the lexicographically smallest one.
    pub fn from_entries<I, K>(entries: I, special: SpecialTokensConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (K, TokenId)>,
        K: Into<CompactString>,
    {
        let entries = entries.into_iter();
        let mut vocab = Vocab::with_capacity(entries.size_hint().0);
        let mut vocab_r = VocabR::with_capacity(entries.size_hint().0);
        let mut shared_ids = 0usize;

        for (text, id) in entries {
            let text = text.into();
            if id < 0 {
                return Err(TokenizerError::InvalidConfig(format!(
                    "Negative id {} for vocabulary entry {:?}",
                    id, text
                )));
            }

            match vocab_r.get_mut(&id) {
                Some(existing) => {
                    shared_ids += 1;
                    if text < *existing {
                        *existing = text.clone();
                    }
                }
                None => {
                    vocab_r.insert(id, text.clone());
                }
            }
            vocab.insert(text, id);
        }

        if shared_ids > 0 {
            warn!(shared_ids, "vocabulary contains ids shared by several strings");
        }

        Ok(Self {
            vocab,
            vocab_r,
            special: SpecialTokens::from_config(special),
        })
    }

    /// Get the ID for a visible string.
    #[inline]
    pub fn get_id(&self, text: &str) -> Option<TokenId> {
        self.vocab.get(text).copied()
    }

    /// Whether the visible string is in the vocabulary.
    #[inline]
    pub fn contains(&self, text: &str) -> bool {
        self.vocab.contains_key(text)
    }

    /// Look up a visible string, falling back to the unknown token.
    #[inline]
    pub fn token_for(&self, text: &str) -> Token {
        match self.vocab.get(text) {
            Some(&id) => Token::new(id, text),
            None => self.special.unk.clone(),
        }
    }

    /// Get the token for an ID, including the special-token sentinels.
    pub fn get_token(&self, id: TokenId) -> Option<Token> {
        match id {
            BOS_TOKEN_ID => Some(self.special.bos.clone()),
            EOS_TOKEN_ID => Some(self.special.eos.clone()),
            UNK_TOKEN_ID => Some(self.special.unk.clone()),
            _ => self.vocab_r.get(&id).map(|text| Token::new(id, text.clone())),
        }
    }

    /// Get the size of the vocabulary (special tokens excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// The special tokens of this vocabulary.
    #[inline]
    pub fn special(&self) -> &SpecialTokens {
        &self.special
    }
}

/// The three special tokens, each carrying its fixed sentinel id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTokens {
    /// Beginning of sequence token
    pub bos: Token,
    /// End of sequence token
    pub eos: Token,
    /// Unknown token
    pub unk: Token,
}

impl SpecialTokens {
    /// Assign the sentinel ids to the configured special-token strings.
    pub fn from_config(config: SpecialTokensConfig) -> Self {
        Self {
            bos: Token::new(BOS_TOKEN_ID, config.bos),
            eos: Token::new(EOS_TOKEN_ID, config.eos),
            unk: Token::new(UNK_TOKEN_ID, config.unk),
        }
    }

    /// Check if an ID is a special token.
    #[inline]
    pub fn is_special(&self, id: TokenId) -> bool {
        id == self.bos.id || id == self.eos.id || id == self.unk.id
    }
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self::from_config(SpecialTokensConfig::default())
    }
}

/// Raw text of the beginning-, end- and unknown-of-sequence tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTokensConfig {
    pub bos: String,
    pub eos: String,
    pub unk: String,
}

impl SpecialTokensConfig {
    /// Use the same text for all three special tokens.
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            bos: text.clone(),
            eos: text.clone(),
            unk: text,
        }
    }
}

impl Default for SpecialTokensConfig {
    fn default() -> Self {
        Self::uniform("<|endoftext|>")
    }
}
