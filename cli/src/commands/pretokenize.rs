//! Pretokenize command implementation.

use clap::Parser;

/// Pretokenize command arguments.
#[derive(Parser)]
pub struct PretokenizeCommand {
    /// Directory holding tokenizer.json and special_tokens_map.json
    #[arg(short, long)]
    pub tokenizer: String,

    /// Text to split ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,
}

use super::{load_tokenizer, read_input};
use anyhow::Result;

pub fn run(cmd: PretokenizeCommand) -> Result<()> {
    let tokenizer = load_tokenizer(&cmd.tokenizer)?;
    let input_text = read_input(cmd.input)?;

    for fragment in tokenizer.pre_tokenize(&input_text) {
        println!("{}", fragment);
    }

    Ok(())
}
