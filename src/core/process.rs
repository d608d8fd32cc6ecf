//! File processing
//!
//! Reads one file leniently and dispatches to the selected tokenizer.
//! Every failure is folded into the per-file outcome: one bad file never
//! aborts the batch.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

use crate::core::basic;
use crate::core::encoder::ModelEncoder;
use crate::core::model::{FileOutcome, TokenData, TokenizeMode};

#[derive(Debug, Error)]
enum ProcessError {
    #[error("file not found")]
    NotFound,

    #[error("read failed: {0}")]
    Read(std::io::Error),
}

/// Tokenizer dispatch, resolved once per run
pub enum FileTokenizer {
    Basic,
    External(ModelEncoder),
}

impl FileTokenizer {
    pub fn mode(&self) -> TokenizeMode {
        match self {
            FileTokenizer::Basic => TokenizeMode::Basic,
            FileTokenizer::External(_) => TokenizeMode::External,
        }
    }
}

// Undecodable byte sequences are replaced, never fatal.
fn read_lossy(path: &Path) -> Result<String, ProcessError> {
    match fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ProcessError::NotFound),
        Err(e) => Err(ProcessError::Read(e)),
    }
}

/// Produce the single outcome for one file
pub fn process_file(path: &Path, tokenizer: &FileTokenizer) -> FileOutcome {
    let content = match read_lossy(path) {
        Ok(content) => content,
        Err(err) => return FileOutcome::failure(path, err.to_string()),
    };

    let data = match tokenizer {
        FileTokenizer::Basic => TokenData::Words(basic::tokenize(&content)),
        FileTokenizer::External(encoder) => TokenData::Ids(encoder.encode(&content)),
    };

    FileOutcome::success(path, data)
}
