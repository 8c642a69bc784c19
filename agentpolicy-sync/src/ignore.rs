//! Ignore-rule enforcer: make a literal line present exactly once.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use agentpolicy_core::error::io_err;
use agentpolicy_core::PolicyError;

/// Outcome of ensuring one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum LineResult {
    Present { line: String },
    Appended { line: String },
    /// Dry-run: the line *would* have been appended.
    WouldAppend { line: String },
}

impl LineResult {
    pub fn line(&self) -> &str {
        match self {
            LineResult::Present { line }
            | LineResult::Appended { line }
            | LineResult::WouldAppend { line } => line,
        }
    }
}

/// Non-empty lines of `text`, split on `\n`, `\r\n` or a lone `\r`.
fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == '\n' || c == '\r')
        .filter(|l| !l.is_empty())
}

/// Lines that equal `line` once surrounding whitespace is trimmed, but not
/// before.
fn whitespace_variants<'a>(text: &'a str, line: &str) -> Vec<&'a str> {
    non_empty_lines(text)
        .filter(|l| *l != line && l.trim() == line)
        .collect()
}

/// Append `line` to `path` unless an identical non-empty line is already
/// there. Creates the file when missing; prior bytes are never changed.
///
/// Matching is exact: `  /docs/` does not satisfy `/docs/`. Such variants are
/// reported with a warning and the canonical line is still appended.
pub fn ensure_line(path: &Path, line: &str, dry_run: bool) -> Result<LineResult, PolicyError> {
    let existing = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(io_err(path, e)),
    };

    let text = String::from_utf8_lossy(&existing);
    if non_empty_lines(&text).any(|l| l == line) {
        tracing::debug!("rule present in {}: {line}", path.display());
        return Ok(LineResult::Present {
            line: line.to_string(),
        });
    }
    for variant in whitespace_variants(&text, line) {
        tracing::warn!(
            "{} has {variant:?}, which differs from rule {line:?} only by whitespace; appending the exact rule",
            path.display()
        );
    }

    if dry_run {
        tracing::info!("[dry-run] would append to {}: {line}", path.display());
        return Ok(LineResult::WouldAppend {
            line: line.to_string(),
        });
    }

    let mut record = String::with_capacity(line.len() + 2);
    if matches!(existing.last(), Some(b) if *b != b'\n' && *b != b'\r') {
        record.push('\n');
    }
    record.push_str(line);
    record.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_err(path, e))?;
    file.write_all(record.as_bytes())
        .map_err(|e| io_err(path, e))?;

    tracing::info!("appended to {}: {line}", path.display());
    Ok(LineResult::Appended {
        line: line.to_string(),
    })
}
