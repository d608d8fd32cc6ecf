//! Persisted output
//!
//! Basic mode writes one space-separated token stream; External mode writes a
//! JSON array with one entry per input file in sorted-path order. The payload
//! is rendered fully in memory and written with a single call, so an
//! interrupted run leaves no partial file behind.

use serde_json::{json, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::model::{RunSummary, TokenData, TokenizeMode};

#[derive(Debug, Error)]
#[error("failed to write output file '{}': {}", .path.display(), .source)]
pub struct OutputError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

// Tokens of successfully processed files, space-separated, sorted by path.
fn render_basic(summary: &RunSummary) -> String {
    let mut flat: Vec<&str> = Vec::new();
    for outcome in summary.outcomes_by_path() {
        if let Some(TokenData::Words(words)) = &outcome.tokens {
            flat.extend(words.iter().map(String::as_str));
        }
    }
    flat.join(" ")
}

// One JSON entry per file: the ID list, or an error placeholder object.
fn render_external(summary: &RunSummary) -> Value {
    let entries: Vec<Value> = summary
        .outcomes_by_path()
        .into_iter()
        .map(|outcome| match &outcome.tokens {
            Some(TokenData::Ids(ids)) => json!(ids),
            _ => json!({
                "error": outcome
                    .error
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string()),
                "file": outcome.path.display().to_string(),
            }),
        })
        .collect();
    Value::Array(entries)
}

/// Write the run's token data to `dest` in the mode-specific format
pub fn write_output(
    summary: &RunSummary,
    mode: TokenizeMode,
    dest: &Path,
) -> Result<(), OutputError> {
    let wrap = |source: io::Error| OutputError {
        path: dest.to_path_buf(),
        source,
    };

    let payload = match mode {
        TokenizeMode::Basic => render_basic(summary),
        TokenizeMode::External => serde_json::to_string(&render_external(summary))
            .map_err(|e| wrap(io::Error::other(e)))?,
    };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
    }

    fs::write(dest, payload).map_err(wrap)
}
