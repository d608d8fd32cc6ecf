//! Aggregation and summary rendering
//!
//! Runs the file processor over every discovered file in order, then renders
//! the per-file report lines and the grand total. Order of the report follows
//! discovery order; the total is order-independent.

use colored::Colorize;
use std::path::PathBuf;

use crate::core::model::{RunSummary, TokenizeMode};
use crate::core::process::{process_file, FileTokenizer};

/// Process all files sequentially, accumulating the run summary
pub fn process_all(files: &[PathBuf], tokenizer: &FileTokenizer, verbose: bool) -> RunSummary {
    let mode = tokenizer.mode();
    let mut summary = RunSummary::new();

    for path in files {
        if verbose {
            println!("Processing: {}...", path.display());
        }

        let outcome = process_file(path, tokenizer);

        if verbose {
            match &outcome.error {
                Some(message) => eprintln!("  Error: {}", message),
                None => println!("  Tokens ({}): {}", mode, outcome.token_count),
            }
        }

        summary.record(outcome);
    }

    summary
}

/// Render the human-readable summary block
pub fn render_summary(summary: &RunSummary, mode: TokenizeMode) -> String {
    let mut out = String::new();
    out.push_str("--- Summary ---\n");

    for outcome in &summary.outcomes {
        match &outcome.error {
            Some(message) => {
                let line = format!("Error ({})", message);
                out.push_str(&format!("{}: {}\n", outcome.path.display(), line.red()));
            }
            None => {
                out.push_str(&format!(
                    "{}: {} tokens ({})\n",
                    outcome.path.display(),
                    outcome.token_count,
                    mode
                ));
            }
        }
    }

    out.push_str(&format!(
        "\nTotal tokens across all processed files: {} ({})\n",
        summary.total_tokens, mode
    ));

    if summary.has_errors() {
        out.push_str(&format!(
            "\nEncountered {} error(s) during processing.\n",
            summary.errors.len()
        ));
    }

    out
}

pub fn print_summary(summary: &RunSummary, mode: TokenizeMode) {
    println!();
    print!("{}", render_summary(summary, mode));
}
