//! CLI module - Command-line interface definition and handler

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::discover::{self, DiscoverError};
use crate::core::encoder::{self, ModelEncoder};
use crate::core::model::TokenizeMode;
use crate::core::process::FileTokenizer;
use crate::core::{output, report};

/// codetok - tokenize code files for analysis or LLM input.
#[derive(Parser, Debug)]
#[command(name = "codetok")]
#[command(
    author,
    version,
    about,
    long_about = r#"codetok splits code files into tokens and reports per-file counts.

Two modes are supported:
- basic: a regex split on whitespace and common punctuation/operators,
  requiring no external dependency
- external: integer token IDs from a tiktoken encoding resolved for --model

Per-file read or tokenize failures are recorded and reported; they never
abort the rest of the batch.

Examples:
    codetok sample_code/example.py --mode basic
    codetok sample_code/ --mode external --model gpt-4
    codetok sample_code/ -m basic -o output/basic_tokens.txt
    codetok sample_code/ -m external -o output/token_ids.json
"#
)]
pub struct Cli {
    /// Path to the code file or directory containing code files.
    #[arg(value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// Tokenization mode (basic/external).
    #[arg(
        short,
        long,
        value_parser = ["basic", "external"],
        value_name = "MODE",
        long_help = "Tokenization mode.\n\n\
Supported values:\n\
- basic: simple regex split, no external dependency\n\
- external: LLM-specific token IDs (requires the tiktoken feature)"
    )]
    pub mode: String,

    /// Model name for the external tokenizer.
    #[arg(
        long,
        default_value = "gpt-4",
        value_name = "NAME",
        long_help = "Model name used to resolve the external encoding\n\
(e.g. 'gpt-4', 'gpt-3.5-turbo'). Unrecognized names fall back to the\n\
general-purpose cl100k_base encoding with a warning.\n\n\
Only used when --mode is external."
    )]
    pub model: String,

    /// Optional path to save the concatenated tokens or token IDs.
    #[arg(
        short,
        long,
        value_name = "FILE",
        long_help = "Optional path to save the run's token data.\n\n\
Basic mode saves tokens separated by spaces. External mode saves a JSON\n\
list with one entry per input file (sorted by path): a list of token IDs,\n\
or an error placeholder object for files that failed."
    )]
    pub output: Option<PathBuf>,

    /// File extensions to process (overrides the default allow-list).
    #[arg(
        long,
        num_args = 1..,
        value_name = "EXT",
        long_help = "File extensions to process, with or without the leading dot.\n\
Matching is case-insensitive.\n\n\
The default allow-list covers common code and text extensions\n\
(.py, .go, .js, .ts, .rs, .java, .c, .cpp, .md, ...)."
    )]
    pub extensions: Vec<String>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Print detailed information about each file processed.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<ExitCode> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mode: TokenizeMode = cli.mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    // Pre-flight: external mode needs the encoding capability before any
    // file is read.
    if mode == TokenizeMode::External && !encoder::available() {
        eprintln!("Error: mode 'external' selected, but tiktoken encodings are unavailable.");
        eprintln!("Rebuild with the `tiktoken` feature enabled.");
        return Ok(ExitCode::FAILURE);
    }

    let extensions = if cli.extensions.is_empty() {
        discover::default_extensions()
    } else {
        discover::normalize_extensions(&cli.extensions)
    };

    println!(
        "Processing files with extensions: {}",
        extensions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let files = match discover::discover_files(&cli.input_path, &extensions) {
        Ok(files) => files,
        Err(err @ DiscoverError::InputNotFound(_)) => {
            eprintln!("Error: {}", err);
            eprintln!("No code files found to process.");
            return Ok(ExitCode::SUCCESS);
        }
        Err(err @ DiscoverError::UnsupportedExtension(_)) => {
            eprintln!("Warning: {}", err);
            eprintln!("No code files found to process.");
            return Ok(ExitCode::FAILURE);
        }
    };

    if files.is_empty() {
        eprintln!("No code files found to process.");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Found {} code file(s) to process.", files.len());

    let tokenizer = match mode {
        TokenizeMode::Basic => FileTokenizer::Basic,
        TokenizeMode::External => FileTokenizer::External(ModelEncoder::resolve(&cli.model)?),
    };

    let summary = report::process_all(&files, &tokenizer, cli.verbose);
    report::print_summary(&summary, mode);

    let mut output_failed = false;
    if let Some(dest) = &cli.output {
        println!("\nSaving concatenated output to: {}", dest.display());
        match output::write_output(&summary, mode, dest) {
            Ok(()) => println!("Output saved successfully."),
            Err(err) => {
                eprintln!("Error: {}", err);
                output_failed = true;
            }
        }
    }

    if output_failed || (summary.has_errors() && cli.output.is_none()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
