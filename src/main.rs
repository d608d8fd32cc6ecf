//! codetok - Tokenize code files for analysis or LLM input
//!
//! codetok provides:
//! - Recursive discovery of code files by extension
//! - Basic regex-based tokenization with no external dependency
//! - LLM tokenization via tiktoken encodings (optional `tiktoken` feature)
//! - Per-file summaries with partial-failure semantics
//! - Optional persisted output (plain tokens or JSON token IDs)

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod core;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
