//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Directory holding tokenizer.json and special_tokens_map.json
    #[arg(short, long)]
    pub tokenizer: String,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use super::load_tokenizer;
use anyhow::{ensure, Context, Result};
use std::fs;
use std::time::Instant;
use tracing::info;

pub fn run(cmd: BenchmarkCommand) -> Result<()> {
    ensure!(cmd.iterations > 0, "iterations must be at least 1");

    let tokenizer = load_tokenizer(&cmd.tokenizer)?;
    let text =
        fs::read_to_string(&cmd.input).with_context(|| format!("Failed to read {}", cmd.input))?;

    println!("Benchmarking tokenization...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Warmup
    let token_count = tokenizer.tokenize(&text).len();

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        let _ = tokenizer.tokenize(&text);
    }
    let elapsed = start.elapsed();

    let avg_secs = elapsed.as_secs_f64() / cmd.iterations as f64;
    info!(
        iterations = cmd.iterations,
        tokens = token_count,
        avg_ms = avg_secs * 1000.0,
        "benchmark finished"
    );

    println!("Results:");
    println!("  Tokens per run: {}", token_count);
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_secs * 1000.0);
    if avg_secs > 0.0 {
        println!("  Throughput: {:.0} tokens/s", token_count as f64 / avg_secs);
        println!(
            "  Throughput: {:.2} MB/s",
            text.len() as f64 / avg_secs / 1_000_000.0
        );
    }

    Ok(())
}
