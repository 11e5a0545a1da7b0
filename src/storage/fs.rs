//! Read-only filesystem helpers
//!
//! Directory listings are sorted so every traversal is deterministic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonFileError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

impl JsonFileError {
    /// Line reported by the parser, if this is a parse error
    pub fn line(&self) -> Option<usize> {
        match self {
            JsonFileError::Parse(e) if e.line() > 0 => Some(e.line()),
            _ => None,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, JsonFileError::Parse(_))
    }
}

/// Reads and parses a JSON file
pub fn read_json(path: &Path) -> Result<Value, JsonFileError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Reads a JSON file, also returning the raw text (for locating keys)
pub fn read_json_with_source(path: &Path) -> Result<(Value, String), JsonFileError> {
    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok((value, content))
}

/// Returns the 1-based line of the top-level `"key":` in JSON object source
///
/// Keys of nested objects are skipped, so `author.name` never shadows `name`.
pub fn find_key_line(source: &str, key: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut line = 1;
    let mut chars = source.char_indices();

    while let Some((start, c)) = chars.next() {
        match c {
            '\n' => line += 1,
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            '"' => {
                let token_line = line;
                let mut escaped = false;
                let mut end = None;
                for (idx, c) in chars.by_ref() {
                    match c {
                        '\\' if !escaped => {
                            escaped = true;
                            continue;
                        }
                        '"' if !escaped => {
                            end = Some(idx);
                            break;
                        }
                        '\n' => line += 1,
                        _ => {}
                    }
                    escaped = false;
                }
                let end = end?;

                if depth == 1
                    && &source[start + 1..end] == key
                    && source[end + 1..].trim_start().starts_with(':')
                {
                    return Some(token_line);
                }
            }
            _ => {}
        }
    }

    None
}

/// Lists immediate subdirectories, sorted by path
pub fn list_subdirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Lists regular files in `dir` with the given extension, sorted by path
pub fn files_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == extension))
        .collect();
    files.sort();
    Ok(files)
}

/// Displays `path` relative to `base` when possible
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
