//! CLI commands for the bytebpe tokenizer.

pub mod benchmark;
pub mod decode;
pub mod encode;
pub mod pretokenize;

pub use benchmark::BenchmarkCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use pretokenize::PretokenizeCommand;

use anyhow::{Context, Result};
use bytebpe_tokenizer::Tokenizer;
use std::io::Read;
use std::path::Path;

/// Load a tokenizer from a directory of configuration files.
pub(crate) fn load_tokenizer(dir: &str) -> Result<Tokenizer> {
    match Tokenizer::from_dir(Path::new(dir)) {
        Ok(tokenizer) => Ok(tokenizer),
        Err(err) if err.is_merge_error() => Err(anyhow::Error::new(err)
            .context(format!("Merge rules in {dir} do not match the vocabulary"))),
        Err(err) => {
            Err(anyhow::Error::new(err).context(format!("Failed to load tokenizer from {dir}")))
        }
    }
}

/// The input text itself, or stdin when it is "-".
pub(crate) fn read_input(input: String) -> Result<String> {
    if input != "-" {
        return Ok(input);
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}
