//! bytebpe-core - Core byte-level BPE implementation
//!
//! This crate provides the data structures and algorithms behind the
//! tokenizer, independent of how text is split or how configuration is
//! loaded.
//!
//! # Features
//!
//! - Byte <-> character alphabet compatible with GPT-2 style vocabularies
//! - Vocabulary storage using `AHashMap` and compact strings
//! - Merge table validated against the vocabulary, indexed by rank and pair
//! - Rank-ordered, single-sweep merge engine
//!
//! # Example
//!
//! ```rust
//! use bytebpe_core::{MergeEngine, MergeTable, SpecialTokensConfig, Vocabulary};
//!
//! let vocab = Vocabulary::from_entries(
//!     [("a", 0), ("b", 1), ("ab", 2)],
//!     SpecialTokensConfig::default(),
//! )?;
//! let merges = MergeTable::from_lines(["a b"], &vocab)?;
//!
//! let group = vec![vocab.token_for("a"), vocab.token_for("b")];
//! let tokens = MergeEngine::new(&merges).merge(vec![group]);
//! assert_eq!(tokens[0].id, 2);
//! # Ok::<(), bytebpe_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE algorithm modules
pub mod core;
pub use core::{
    merge_sweep, parse_merge_line, MergeEngine, MergeRule, MergeTable, SpecialTokens,
    SpecialTokensConfig, Token, TokenGroup, TokenId, TokenPair, Vocab, VocabR, Vocabulary,
    BOS_TOKEN_ID, EOS_TOKEN_ID, UNK_TOKEN_ID,
};

// Byte-level alphabet and decoding
pub mod encoding;
pub use encoding::{ByteCodepointMap, ByteLevelDecoder};
