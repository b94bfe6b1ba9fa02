//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties the
//! pre-tokenizer, vocabulary, merge table and decoder together.

use crate::pre_tokenizer::{NormalizationForm, Normalizer, PreTokenizer};
use bytebpe_core::{
    ByteCodepointMap, ByteLevelDecoder, MergeEngine, MergeTable, Result, SpecialTokens,
    SpecialTokensConfig, Token, TokenGroup, TokenId, Vocabulary,
};
use compact_str::CompactString;
use std::path::Path;
use tracing::{debug, trace};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerConfig {
    /// Prepend a space to text that does not start with one
    pub add_prefix_space: bool,
    /// Unicode normalization applied before splitting
    pub normalization: NormalizationForm,
    /// Special tokens configuration
    pub special_tokens: SpecialTokensConfig,
}

/// Merge rules as handed to the builder.
#[derive(Debug, Clone)]
enum MergeSource {
    /// `"left right"` lines, still to be split
    Lines(Vec<String>),
    /// Already split `(left, right)` pairs
    Pairs(Vec<(String, String)>),
}

impl Default for MergeSource {
    fn default() -> Self {
        Self::Pairs(Vec::new())
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
    vocab: Vec<(CompactString, TokenId)>,
    merges: MergeSource,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vocabulary: visible string -> id.
    pub fn vocab<I, K>(mut self, vocab: I) -> Self
    where
        I: IntoIterator<Item = (K, TokenId)>,
        K: Into<CompactString>,
    {
        self.vocab = vocab.into_iter().map(|(k, id)| (k.into(), id)).collect();
        self
    }

    /// Set the merge rules as `"left right"` lines, in rank order.
    pub fn merges<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.merges = MergeSource::Lines(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Set the merge rules as `(left, right)` pairs, in rank order.
    pub fn merge_pairs<I, L, R>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, R)>,
        L: Into<String>,
        R: Into<String>,
    {
        self.merges = MergeSource::Pairs(
            pairs
                .into_iter()
                .map(|(l, r)| (l.into(), r.into()))
                .collect(),
        );
        self
    }

    /// Set special tokens.
    pub fn special_tokens(mut self, tokens: SpecialTokensConfig) -> Self {
        self.config.special_tokens = tokens;
        self
    }

    /// Prepend a space to text that does not start with one.
    pub fn add_prefix_space(mut self, enabled: bool) -> Self {
        self.config.add_prefix_space = enabled;
        self
    }

    /// Set the normalization form.
    pub fn normalization(mut self, form: NormalizationForm) -> Self {
        self.config.normalization = form;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TokenizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the merge rules against the vocabulary and build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        let vocab = Vocabulary::from_entries(self.vocab, self.config.special_tokens.clone())?;
        let merges = match &self.merges {
            MergeSource::Lines(lines) => MergeTable::from_lines(lines, &vocab)?,
            MergeSource::Pairs(pairs) => {
                MergeTable::from_pairs(pairs.iter().map(|(l, r)| (l, r)), &vocab)?
            }
        };
        Ok(Tokenizer::from_parts(vocab, merges, self.config))
    }
}

/// Main tokenizer struct.
///
/// Immutable once built, so one instance can serve concurrent `tokenize`
/// calls from several threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    vocab: Vocabulary,
    merges: MergeTable,
    pre_tokenizer: PreTokenizer,
    decoder: ByteLevelDecoder,
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Assemble a tokenizer from an already validated vocabulary and merge table.
    pub fn from_parts(vocab: Vocabulary, merges: MergeTable, config: TokenizerConfig) -> Self {
        let bytes = ByteCodepointMap::new();
        let pre_tokenizer = PreTokenizer::new(
            Normalizer::new(config.normalization),
            bytes.clone(),
            config.add_prefix_space,
        );

        debug!(
            vocab_size = vocab.len(),
            merges = merges.len(),
            add_prefix_space = config.add_prefix_space,
            "tokenizer ready"
        );

        Self {
            vocab,
            merges,
            pre_tokenizer,
            decoder: ByteLevelDecoder::new(bytes),
            config,
        }
    }

    /// Load `tokenizer.json` and `special_tokens_map.json` from a directory.
    pub fn from_dir(path: &Path) -> Result<Self> {
        crate::io::TokenizerLoader::from_dir(path)
    }

    /// Load from an explicit tokenizer config and special tokens map.
    pub fn from_files(tokenizer_json: &Path, special_tokens_map: &Path) -> Result<Self> {
        crate::io::TokenizerLoader::from_files(tokenizer_json, special_tokens_map)
    }

    /// Split text into visible-string fragments.
    pub fn pre_tokenize(&self, text: &str) -> Vec<String> {
        self.pre_tokenizer.split(text)
    }

    /// Look up a visible string, falling back to the unknown token.
    #[inline]
    pub fn token_for(&self, text: &str) -> Token {
        self.vocab.token_for(text)
    }

    /// One token per character of a fragment.
    fn initial_group(&self, fragment: &str) -> TokenGroup {
        let mut buf = [0u8; 4];
        fragment
            .chars()
            .map(|ch| self.vocab.token_for(ch.encode_utf8(&mut buf)))
            .collect()
    }

    /// Tokenize text into vocabulary tokens.
    ///
    /// Characters missing from the vocabulary become the unknown token.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let groups: Vec<TokenGroup> = self
            .pre_tokenizer
            .split(text)
            .iter()
            .map(|fragment| self.initial_group(fragment))
            .collect();
        trace!(fragments = groups.len(), "pre-tokenized");

        MergeEngine::new(&self.merges).merge(groups)
    }

    /// Encode text to tokens and ids.
    ///
    /// # Arguments
    /// * `text` - The text to encode
    /// * `add_special_tokens` - Whether to wrap the result in BOS and EOS
    pub fn encode(&self, text: &str, add_special_tokens: bool) -> Encoding {
        let mut tokens = self.tokenize(text);

        if add_special_tokens {
            let special = self.vocab.special();
            tokens.insert(0, special.bos.clone());
            tokens.push(special.eos.clone());
        }

        Encoding {
            ids: tokens.iter().map(|token| token.id).collect(),
            tokens,
            text: text.to_string(),
        }
    }

    /// Reconstruct text from tokens.
    pub fn render_text(&self, tokens: &[Token]) -> String {
        self.decoder.render_text(tokens)
    }

    /// Tokens with their text decoded back to plain text.
    pub fn decode_tokens(&self, tokens: &[Token]) -> Vec<Token> {
        self.decoder.decode_tokens(tokens)
    }

    /// Decode token IDs back to text.
    ///
    /// Ids that are not in the vocabulary render as the unknown token.
    ///
    /// # Arguments
    /// * `ids` - The token IDs to decode
    /// * `skip_special_tokens` - Whether to drop BOS, EOS and UNK
    pub fn decode(&self, ids: &[TokenId], skip_special_tokens: bool) -> String {
        let tokens: Vec<Token> = ids
            .iter()
            .map(|&id| {
                self.id_to_token(id)
                    .unwrap_or_else(|| self.vocab.special().unk.clone())
            })
            .filter(|token| !(skip_special_tokens && token.is_special()))
            .collect();
        self.render_text(&tokens)
    }

    /// Get the token for an ID.
    pub fn id_to_token(&self, id: TokenId) -> Option<Token> {
        self.vocab.get_token(id)
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get a reference to the merge table.
    pub fn merge_table(&self) -> &MergeTable {
        &self.merges
    }

    /// The special tokens.
    pub fn special_tokens(&self) -> &SpecialTokens {
        self.vocab.special()
    }

    /// The configuration this tokenizer was built with.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }
}

/// Result of encoding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// Token IDs
    pub ids: Vec<TokenId>,
    /// Tokens, in the same order as `ids`
    pub tokens: Vec<Token>,
    /// Original text
    pub text: String,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Get the tokens' visible strings.
    pub fn get_tokens(&self) -> Vec<&str> {
        self.tokens.iter().map(|token| token.text.as_str()).collect()
    }
}
