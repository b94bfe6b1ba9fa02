//! Error types for the byte-level BPE tokenizer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
///
/// The first three variants are construction faults: a tokenizer is either
/// fully built or not built at all. The rest come from loading configuration
/// files from disk.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// A merge rule does not split into exactly two whitespace-separated pieces
    #[error("Bad merge rule at rank {rank}: {rule:?}")]
    BadMerges { rank: usize, rule: String },

    /// The left or right piece of a merge rule is missing from the vocabulary
    #[error("Merge piece not in vocabulary at rank {rank}: {piece:?}")]
    MergePieceNotInVocab { rank: usize, piece: String },

    /// The concatenation of a merge rule's pieces is missing from the vocabulary
    #[error("Merge result not in vocabulary at rank {rank}: {merged:?}")]
    MergeNotInVocab { rank: usize, merged: String },

    /// Error loading vocabulary, merges or special tokens
    #[error("Load error: {0}")]
    Load(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenizerError {
    /// Whether this error was raised while validating merge rules.
    pub fn is_merge_error(&self) -> bool {
        matches!(
            self,
            Self::BadMerges { .. } | Self::MergePieceNotInVocab { .. } | Self::MergeNotInVocab { .. }
        )
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
