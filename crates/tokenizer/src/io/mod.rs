//! Loading of pretrained tokenizer configuration.
//!
//! This module reads HuggingFace-style configuration files (`tokenizer.json`,
//! `special_tokens_map.json`, or `vocab.json` + `merges.txt`) and builds a
//! [`Tokenizer`](crate::Tokenizer) from them.

pub mod format;
pub mod load;

pub use format::{
    HuggingFaceVocab, MergeEntry, SpecialTokenEntry, SpecialTokensMap, TokenizerFile,
};
pub use load::{parse_merges_txt, TokenizerLoader};
