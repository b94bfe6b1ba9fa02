//! bytebpe-tokenizer - High-level tokenizer API
//!
//! This crate provides the user-facing byte-level BPE tokenizer, integrating
//! all components (pre-tokenizer, vocabulary, merge table, decoder) into a
//! single API.
//!
//! # Features
//!
//! - Builder pattern for tokenizer configuration
//! - GPT-2 style pre-tokenization with NFC normalization
//! - Rank-ordered merging that reproduces the reference token ids
//! - Loading from HuggingFace `tokenizer.json` / `special_tokens_map.json`
//!
//! # Example
//!
//! ```rust
//! use bytebpe_tokenizer::Tokenizer;
//!
//! let tokenizer = Tokenizer::builder()
//!     .vocab([("h", 0), ("i", 1), ("hi", 2)])
//!     .merges(["h i"])
//!     .build()?;
//!
//! let tokens = tokenizer.tokenize("hi");
//! assert_eq!(tokens[0].id, 2);
//! assert_eq!(tokenizer.render_text(&tokens), "hi");
//! # Ok::<(), bytebpe_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use bytebpe_core::{
    ByteCodepointMap, Result, SpecialTokens, SpecialTokensConfig, Token, TokenId,
    TokenizerError, BOS_TOKEN_ID, EOS_TOKEN_ID, UNK_TOKEN_ID,
};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Encoding, Tokenizer, TokenizerBuilder, TokenizerConfig};

// Configuration loading
pub mod io;
pub use io::TokenizerLoader;

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{NormalizationForm, Normalizer, PreTokenizer, Splitter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
