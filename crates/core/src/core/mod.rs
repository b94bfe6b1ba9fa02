//! Core BPE algorithm implementation.
//!
//! This module contains the token types, the vocabulary, the merge table and
//! the rank-ordered merge engine.

pub mod engine;
pub mod merges;
pub mod token;
pub mod vocab;

pub use engine::{merge_sweep, MergeEngine, TokenGroup};
pub use merges::{parse_merge_line, MergeRule, MergeTable};
pub use token::{Token, TokenId, TokenPair, BOS_TOKEN_ID, EOS_TOKEN_ID, UNK_TOKEN_ID};
pub use vocab::{SpecialTokens, SpecialTokensConfig, Vocab, VocabR, Vocabulary};
