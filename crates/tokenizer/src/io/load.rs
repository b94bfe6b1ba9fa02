//! Load functionality for pretrained tokenizers.
//!
//! The loader turns configuration files into the plain data the tokenizer
//! is built from: a vocabulary map, an ordered list of merge pairs and the
//! three special-token strings. Validation of the merges happens when the
//! tokenizer is built.

use super::format::{HuggingFaceVocab, MergeEntry, SpecialTokensMap, TokenizerFile};
use crate::pre_tokenizer::NormalizationForm;
use crate::tokenizer::{Tokenizer, TokenizerConfig};
use bytebpe_core::{parse_merge_line, Result, SpecialTokensConfig, TokenizerError};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// File name of the tokenizer configuration.
pub const TOKENIZER_FILE: &str = "tokenizer.json";
/// File name of the special tokens map.
pub const SPECIAL_TOKENS_FILE: &str = "special_tokens_map.json";
/// File name of a standalone vocabulary.
pub const VOCAB_FILE: &str = "vocab.json";
/// File name of standalone merge rules.
pub const MERGES_FILE: &str = "merges.txt";

/// Tokenizer loader - handles loading pretrained models.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load from a directory holding `tokenizer.json` and, optionally,
    /// `special_tokens_map.json`.
    pub fn from_dir(path: &Path) -> Result<Tokenizer> {
        let tokenizer_path = path.join(TOKENIZER_FILE);
        let file: TokenizerFile = read_json(&tokenizer_path)?;
        let special = read_optional_special(path)?;
        Self::build(file, special, &tokenizer_path.display().to_string())
    }

    /// Load from an explicit tokenizer config and special tokens map.
    pub fn from_files(tokenizer_json: &Path, special_tokens_map: &Path) -> Result<Tokenizer> {
        let file: TokenizerFile = read_json(tokenizer_json)?;
        let special: SpecialTokensMap = read_json(special_tokens_map)?;
        Self::build(file, Some(special), &tokenizer_json.display().to_string())
    }

    /// Load from in-memory JSON documents.
    pub fn from_json_str(
        tokenizer_json: &str,
        special_tokens_map: Option<&str>,
    ) -> Result<Tokenizer> {
        let file: TokenizerFile = serde_json::from_str(tokenizer_json)?;
        let special = special_tokens_map
            .map(|json| serde_json::from_str::<SpecialTokensMap>(json))
            .transpose()?;
        Self::build(file, special, "in-memory tokenizer JSON")
    }

    /// Load from HuggingFace's split format (vocab.json + merges.txt).
    ///
    /// Expects two files in the given directory:
    /// - `vocab.json`: Token to ID mapping
    /// - `merges.txt`: Merge rules, one per line, after an optional
    ///   `#version` header
    ///
    /// `special_tokens_map.json` is used when present.
    pub fn load_huggingface(path: &Path) -> Result<Tokenizer> {
        let vocab_path = path.join(VOCAB_FILE);
        let vocab: HuggingFaceVocab = read_json(&vocab_path)?;
        ensure_vocab(&vocab, &vocab_path.display().to_string())?;

        let merges_path = path.join(MERGES_FILE);
        let merges_content =
            std::fs::read_to_string(&merges_path).map_err(|err| TokenizerError::Io {
                path: merges_path.clone(),
                err,
            })?;
        let merges = parse_merges_txt(&merges_content)?;

        let special = read_optional_special(path)?;
        let config = TokenizerConfig {
            special_tokens: special_tokens_config(special, None),
            ..TokenizerConfig::default()
        };

        Tokenizer::builder()
            .vocab(vocab)
            .merge_pairs(merges)
            .config(config)
            .build()
    }

    /// Turn parsed configuration into a tokenizer.
    ///
    /// Byte-level BPE always normalizes to NFC; another configured form is
    /// reported and ignored.
    fn build(
        file: TokenizerFile,
        special: Option<SpecialTokensMap>,
        source: &str,
    ) -> Result<Tokenizer> {
        if file.model.kind != "BPE" {
            return Err(TokenizerError::InvalidConfig(format!(
                "Unsupported model type: {}",
                file.model.kind
            )));
        }

        if !file.added_tokens.is_empty() {
            debug!(
                added_tokens = file.added_tokens.len(),
                "added tokens are not matched in input text"
            );
        }

        ensure_vocab(&file.model.vocab, source)?;

        if let Some(section) = &file.normalizer {
            match section.kind.parse::<NormalizationForm>() {
                Ok(NormalizationForm::NFC) => {}
                Ok(form) => warn!(?form, "ignoring configured normalizer, using NFC"),
                Err(reason) => warn!(%reason, "ignoring configured normalizer, using NFC"),
            }
        }
        let add_prefix_space = file
            .pre_tokenizer
            .as_ref()
            .is_some_and(|section| section.add_prefix_space);

        let merges = file
            .model
            .merges
            .into_iter()
            .enumerate()
            .map(|(rank, entry)| match entry {
                MergeEntry::Line(line) => parse_merge_line(&line, rank),
                MergeEntry::Pair(left, right) => Ok((left, right)),
            })
            .collect::<Result<Vec<_>>>()?;

        let config = TokenizerConfig {
            add_prefix_space,
            normalization: NormalizationForm::NFC,
            special_tokens: special_tokens_config(special, file.model.unk_token),
        };

        Tokenizer::builder()
            .vocab(file.model.vocab)
            .merge_pairs(merges)
            .config(config)
            .build()
    }
}

/// Parse the body of a `merges.txt` file.
pub fn parse_merges_txt(content: &str) -> Result<Vec<(String, String)>> {
    content
        .lines()
        .filter(|line| !line.starts_with("#version"))
        .enumerate()
        .map(|(rank, line)| parse_merge_line(line, rank))
        .collect()
}

/// Special tokens from the map, else the model's unknown token, else defaults.
fn special_tokens_config(
    special: Option<SpecialTokensMap>,
    model_unk: Option<String>,
) -> SpecialTokensConfig {
    match special {
        Some(map) => SpecialTokensConfig {
            bos: map.bos_token.content().to_string(),
            eos: map.eos_token.content().to_string(),
            unk: map.unk_token.content().to_string(),
        },
        None => {
            let mut config = SpecialTokensConfig::default();
            if let Some(unk) = model_unk {
                config.unk = unk;
            }
            config
        }
    }
}

fn ensure_vocab(vocab: &HuggingFaceVocab, source: &str) -> Result<()> {
    if vocab.is_empty() {
        return Err(TokenizerError::Load(format!("empty vocabulary in {source}")));
    }
    Ok(())
}

fn read_optional_special(dir: &Path) -> Result<Option<SpecialTokensMap>> {
    let path = dir.join(SPECIAL_TOKENS_FILE);
    if path.is_file() {
        read_json(&path).map(Some)
    } else {
        warn!(path = %path.display(), "no special tokens map, using defaults");
        Ok(None)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|err| TokenizerError::Io {
        path: path.to_path_buf(),
        err,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
