//! Encode command implementation.

use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Directory holding tokenizer.json and special_tokens_map.json
    #[arg(short, long)]
    pub tokenizer: String,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Add special tokens (BOS, EOS)
    #[arg(short, long, default_value_t = false)]
    pub special_tokens: bool,

    /// Print each token as a JSON object with its id and visible string
    #[arg(long, default_value_t = false)]
    pub show_tokens: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use super::{load_tokenizer, read_input};
use anyhow::{Context, Result};
use bytebpe_tokenizer::Encoding;
use tracing::info;

/// Ids separated by spaces, or one JSON object per token.
fn format_output(encoding: &Encoding, show_tokens: bool) -> Result<String> {
    if show_tokens {
        let lines = encoding
            .tokens
            .iter()
            .map(serde_json::to_string)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    } else {
        Ok(encoding
            .ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

pub fn run(cmd: EncodeCommand) -> Result<()> {
    let tokenizer = load_tokenizer(&cmd.tokenizer)?;
    let input_text = read_input(cmd.input)?;

    let encoding = tokenizer.encode(&input_text, cmd.special_tokens);
    info!(
        tokens = encoding.len(),
        bytes = input_text.len(),
        "encoded input"
    );

    let output = format_output(&encoding, cmd.show_tokens)?;

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output).with_context(|| format!("Failed to write {path}"))?;
            println!("Encoded {} tokens to {}", encoding.len(), path);
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
