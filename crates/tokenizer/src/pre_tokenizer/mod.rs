//! Pre-tokenization pipeline.
//!
//! Normalizes text, splits it into fragments and re-encodes each fragment's
//! UTF-8 bytes through the byte-level alphabet.

pub mod normalize;
pub mod split;

pub use normalize::{NormalizationForm, Normalizer};
pub use split::{Splitter, GPT2_PATTERN};

use bytebpe_core::ByteCodepointMap;

/// Turns raw text into visible-string fragments.
#[derive(Debug, Clone, Default)]
pub struct PreTokenizer {
    normalizer: Normalizer,
    splitter: Splitter,
    bytes: ByteCodepointMap,
    add_prefix_space: bool,
}

impl PreTokenizer {
    /// Create a pre-tokenizer.
    pub fn new(normalizer: Normalizer, bytes: ByteCodepointMap, add_prefix_space: bool) -> Self {
        Self {
            normalizer,
            splitter: Splitter::new(),
            bytes,
            add_prefix_space,
        }
    }

    /// Normalize the text and prepend a space when configured to.
    fn prepare(&self, text: &str) -> String {
        let normalized = self.normalizer.normalize(text);
        if self.add_prefix_space && !normalized.is_empty() && !normalized.starts_with(' ') {
            format!(" {normalized}")
        } else {
            normalized
        }
    }

    /// Fragments of the prepared text, before byte remapping.
    pub fn fragments(&self, text: &str) -> Vec<String> {
        let prepared = self.prepare(text);
        self.splitter
            .split(&prepared)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Visible-string fragments, one per match, in input order.
    pub fn split(&self, text: &str) -> Vec<String> {
        let prepared = self.prepare(text);
        self.splitter
            .split(&prepared)
            .into_iter()
            .map(|fragment| self.bytes.encode_bytes(fragment.as_bytes()))
            .collect()
    }
}
