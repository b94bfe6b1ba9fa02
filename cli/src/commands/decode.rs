//! Decode command implementation.

use clap::Parser;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Directory holding tokenizer.json and special_tokens_map.json
    #[arg(short, long)]
    pub tokenizer: String,

    /// Token IDs to decode, separated by spaces or commas
    #[arg(short, long, allow_hyphen_values = true)]
    pub input: String,

    /// Skip special tokens during decoding
    #[arg(short, long, default_value_t = false)]
    pub skip_special_tokens: bool,
}

use super::load_tokenizer;
use anyhow::{Context, Result};
use bytebpe_tokenizer::TokenId;

/// Parse a list of ids separated by whitespace and/or commas.
fn parse_ids(input: &str) -> Result<Vec<TokenId>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<TokenId>()
                .with_context(|| format!("Invalid token id: {s}"))
        })
        .collect()
}

pub fn run(cmd: DecodeCommand) -> Result<()> {
    let tokenizer = load_tokenizer(&cmd.tokenizer)?;
    let ids = parse_ids(&cmd.input)?;

    let text = tokenizer.decode(&ids, cmd.skip_special_tokens);
    println!("{}", text);

    Ok(())
}
