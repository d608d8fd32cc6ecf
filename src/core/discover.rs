//! File discovery
//!
//! Resolves an input path (file or directory) into the sorted list of
//! absolute file paths whose extension is in the allow-list.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Code file extensions processed by default
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".py", ".go", ".js", ".jsx", ".ts", ".tsx", ".java", ".c", ".cpp", ".h", ".hpp", ".cs", ".rb",
    ".php", ".swift", ".kt", ".scala", ".rs", ".lua", ".sh", ".bash", ".html", ".css", ".scss",
    ".sql", ".yaml", ".yml", ".json", ".md", ".txt",
];

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("skipping file with unsupported extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),
}

/// Normalize raw extension arguments: lower-case, with a leading dot
pub fn normalize_extensions<S: AsRef<str>>(raw: &[S]) -> BTreeSet<String> {
    raw.iter()
        .map(|ext| {
            let ext = ext.as_ref().to_lowercase();
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            }
        })
        .collect()
}

/// The default allow-list, normalized
pub fn default_extensions() -> BTreeSet<String> {
    normalize_extensions(DEFAULT_EXTENSIONS)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

fn has_allowed_extension(path: &Path, allowed: &BTreeSet<String>) -> bool {
    extension_of(path)
        .map(|ext| allowed.contains(&ext))
        .unwrap_or(false)
}

/// Discover code files under `input`, sorted lexicographically by path.
///
/// A single named file must match the allow-list; a directory is walked
/// recursively and filtered. Unreadable directory entries are skipped.
pub fn discover_files(
    input: &Path,
    allowed: &BTreeSet<String>,
) -> Result<Vec<PathBuf>, DiscoverError> {
    let root = std::fs::canonicalize(input)
        .map_err(|_| DiscoverError::InputNotFound(input.to_path_buf()))?;

    if root.is_file() {
        if has_allowed_extension(&root, allowed) {
            return Ok(vec![root]);
        }
        return Err(DiscoverError::UnsupportedExtension(root));
    }

    if !root.is_dir() {
        return Err(DiscoverError::InputNotFound(root));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if has_allowed_extension(entry.path(), allowed) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
