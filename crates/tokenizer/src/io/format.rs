//! Format definitions for tokenizer configuration files.
//!
//! These structures mirror the parts of HuggingFace `tokenizer.json` and
//! `special_tokens_map.json` that a byte-level BPE tokenizer needs. Unknown
//! fields are ignored.

use ahash::AHashMap;
use serde::Deserialize;

/// Vocabulary in HuggingFace format.
pub type HuggingFaceVocab = AHashMap<String, i64>;

/// Complete `tokenizer.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerFile {
    /// Format version
    #[serde(default)]
    pub version: Option<String>,
    /// Added tokens; parsed for diagnostics, not matched in text
    #[serde(default)]
    pub added_tokens: Vec<AddedToken>,
    #[serde(default)]
    pub normalizer: Option<NormalizerSection>,
    #[serde(default)]
    pub pre_tokenizer: Option<ProcessorSection>,
    #[serde(default)]
    pub post_processor: Option<ProcessorSection>,
    #[serde(default)]
    pub decoder: Option<ProcessorSection>,
    pub model: ModelSection,
}

/// A token added on top of the BPE vocabulary.
#[derive(Debug, Clone, Deserialize)]
pub struct AddedToken {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub single_word: bool,
    #[serde(default)]
    pub lstrip: bool,
    #[serde(default)]
    pub rstrip: bool,
    #[serde(default)]
    pub normalized: bool,
    #[serde(default)]
    pub special: bool,
}

/// `normalizer` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerSection {
    #[serde(rename = "type")]
    pub kind: String,
}

/// `pre_tokenizer`, `post_processor` and `decoder` sections.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorSection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub add_prefix_space: bool,
    #[serde(default)]
    pub trim_offsets: bool,
    #[serde(default)]
    pub use_regex: bool,
}

/// `model` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSection {
    #[serde(rename = "type", default = "default_model_type")]
    pub kind: String,
    #[serde(default)]
    pub unk_token: Option<String>,
    #[serde(default)]
    pub continuing_subword_prefix: Option<String>,
    #[serde(default)]
    pub end_of_word_suffix: Option<String>,
    #[serde(default)]
    pub fuse_unk: bool,
    pub vocab: HuggingFaceVocab,
    pub merges: Vec<MergeEntry>,
}

fn default_model_type() -> String {
    "BPE".to_string()
}

/// One merge rule: `"left right"` (older files) or `["left", "right"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MergeEntry {
    Line(String),
    Pair(String, String),
}

/// `special_tokens_map.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialTokensMap {
    pub bos_token: SpecialTokenEntry,
    pub eos_token: SpecialTokenEntry,
    pub unk_token: SpecialTokenEntry,
}

/// A special token given as plain text or as an added-token object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SpecialTokenEntry {
    Text(String),
    Object { content: String },
}

impl SpecialTokenEntry {
    /// Raw text of the token.
    pub fn content(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Object { content } => content,
        }
    }
}
