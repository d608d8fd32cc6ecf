//! Run data model
//!
//! Every discovered file is folded into exactly one [`FileOutcome`]; the
//! aggregation pass collects them into a [`RunSummary`] which is never
//! mutated after the batch completes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Tokenization mode selecting which tokenizer the file processor invokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenizeMode {
    /// Regex-based splitting, no external dependency
    #[default]
    Basic,
    /// Token IDs from a tiktoken encoding
    External,
}

impl fmt::Display for TokenizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenizeMode::Basic => "basic",
            TokenizeMode::External => "external",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TokenizeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(TokenizeMode::Basic),
            "external" | "tiktoken" => Ok(TokenizeMode::External),
            _ => Err(format!("Unknown mode: {}. Available: basic, external", s)),
        }
    }
}

/// Token payload of a successfully processed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenData {
    /// String tokens from the basic tokenizer
    Words(Vec<String>),
    /// Integer token IDs from an external encoding
    Ids(Vec<u32>),
}

impl TokenData {
    pub fn len(&self) -> usize {
        match self {
            TokenData::Words(words) => words.len(),
            TokenData::Ids(ids) => ids.len(),
        }
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-file result: either a token count plus data, or an error message
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub token_count: usize,
    pub tokens: Option<TokenData>,
    pub error: Option<String>,
}

impl FileOutcome {
    /// Create a successful outcome
    pub fn success(path: impl Into<PathBuf>, tokens: TokenData) -> Self {
        Self {
            path: path.into(),
            token_count: tokens.len(),
            tokens: Some(tokens),
            error: None,
        }
    }

    /// Create a failed outcome carrying the error message
    pub fn failure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            token_count: 0,
            tokens: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Accumulated result of one run over all discovered files
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub total_tokens: usize,
    pub outcomes: Vec<FileOutcome>,
    pub errors: Vec<String>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome, updating the grand total and error list
    pub fn record(&mut self, outcome: FileOutcome) {
        match &outcome.error {
            Some(message) => {
                self.errors
                    .push(format!("{}: {}", outcome.path.display(), message));
            }
            None => self.total_tokens += outcome.token_count,
        }
        self.outcomes.push(outcome);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Outcomes sorted by path, for stable persisted output
    pub fn outcomes_by_path(&self) -> Vec<&FileOutcome> {
        let mut sorted: Vec<&FileOutcome> = self.outcomes.iter().collect();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));
        sorted
    }

    #[allow(dead_code)]
    pub fn outcome_for(&self, path: &Path) -> Option<&FileOutcome> {
        self.outcomes.iter().find(|o| o.path == path)
    }
}
