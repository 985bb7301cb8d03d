//! Persisted record parsing.
//!
//! A record file holds repeated two-line groups, one per traced source
//! file:
//!
//! ```text
//! /home/me/project/pkg/mod.py
//! [1, 2, 5, 9, 9]
//! ```
//!
//! Line numbers are 1-based. A malformed group only poisons its own file.

use crate::result::{TracecovError, TracecovResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sparse execution data for one source file from one trace run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExecutionRecord {
    /// Separator-normalized source path
    pub file_path: String,
    /// 1-based executed line numbers in appearance order
    pub executed_lines: Vec<u32>,
}

impl RawExecutionRecord {
    /// Create a record, normalizing the path separators.
    #[must_use]
    pub fn new(file_path: &str, executed_lines: Vec<u32>) -> Self {
        Self {
            file_path: normalize_path(file_path),
            executed_lines,
        }
    }

    /// Highest line number reported, 0 when none.
    #[must_use]
    pub fn max_line(&self) -> u32 {
        self.executed_lines.iter().copied().max().unwrap_or(0)
    }

    /// Whether the tracer reported nothing for this file
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executed_lines.is_empty()
    }
}

/// Replace backslash separators with `/`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.trim().replace('\\', "/")
}

/// Parse one `[n1, n2, ...]` line list.
///
/// `line` is the 1-based position of the list in the record file and only
/// feeds the error message.
pub fn parse_line_list(text: &str, line: usize) -> TracecovResult<Vec<u32>> {
    let text = text.trim();
    let inner = text
        .strip_prefix('[')
        .ok_or_else(|| TracecovError::format(line, "line list must start with '['"))?
        .strip_suffix(']')
        .ok_or_else(|| TracecovError::format(line, "line list must end with ']'"))?;

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .enumerate()
        .map(|(position, item)| parse_line_number(item, position > 0, line))
        .collect()
}

/// One list item: ASCII digits only, optionally led by a single space when
/// it follows a comma.
fn parse_line_number(item: &str, after_comma: bool, line: usize) -> TracecovResult<u32> {
    let digits = if after_comma {
        item.strip_prefix(' ').unwrap_or(item)
    } else {
        item
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TracecovError::format(
            line,
            format!("'{}' is not a line number", item.trim()),
        ));
    }
    digits
        .parse::<u32>()
        .map_err(|_| TracecovError::format(line, format!("line number {digits} is out of range")))
}

/// Parse a path line plus its line-list line into a record.
pub fn parse_record(
    path_line: &str,
    list_line: &str,
    line: usize,
) -> TracecovResult<RawExecutionRecord> {
    let executed_lines = parse_line_list(list_line, line)?;
    Ok(RawExecutionRecord::new(path_line, executed_lines))
}

/// One group of a record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordEntry {
    /// Well-formed entry
    Parsed(RawExecutionRecord),
    /// Entry whose line list could not be parsed; the file has no raw data
    Malformed {
        /// Separator-normalized source path
        file_path: String,
        /// 1-based record line of the bad list
        line: usize,
        /// What was wrong
        message: String,
    },
}

impl RecordEntry {
    /// Normalized path of the source file this entry describes
    #[must_use]
    pub fn file_path(&self) -> &str {
        match self {
            Self::Parsed(record) => &record.file_path,
            Self::Malformed { file_path, .. } => file_path,
        }
    }

    /// The parsed record, `None` for malformed entries
    #[must_use]
    pub const fn record(&self) -> Option<&RawExecutionRecord> {
        match self {
            Self::Parsed(record) => Some(record),
            Self::Malformed { .. } => None,
        }
    }
}

/// All entries of a persisted record file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFile {
    entries: Vec<RecordEntry>,
}

impl RecordFile {
    /// Parse a whole record file. Malformed groups are kept as
    /// [`RecordEntry::Malformed`] instead of failing the load.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        let mut lines = text.lines().enumerate().peekable();

        while let Some((index, path_line)) = lines.next() {
            if path_line.trim().is_empty() {
                continue;
            }
            if is_list_shaped(path_line) {
                tracing::warn!(line = index + 1, "skipping line list without a path");
                continue;
            }
            let file_path = normalize_path(path_line);
            // A line that cannot be a list starts the next group
            let entry = match lines.next_if(|(_, next)| is_list_shaped(next)) {
                Some((list_index, list_line)) => {
                    match parse_record(path_line, list_line, list_index + 1) {
                        Ok(record) => RecordEntry::Parsed(record),
                        Err(err) => malformed(file_path, list_index + 1, &err),
                    }
                }
                None => malformed(
                    file_path,
                    index + 2,
                    &TracecovError::format(index + 2, "missing line list"),
                ),
            };
            entries.push(entry);
        }

        tracing::debug!(entries = entries.len(), "parsed coverage record");
        Self { entries }
    }

    /// Read and parse a record file from disk.
    pub fn load(path: &Path) -> TracecovResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// All entries in file order
    #[must_use]
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for `path`.
    ///
    /// Exact matches win; otherwise a project-relative path on either side
    /// matches when it is a `/`-aligned suffix of the other. When a path
    /// appears more than once the last entry wins.
    #[must_use]
    pub fn entry(&self, path: &str) -> Option<&RecordEntry> {
        let wanted = normalize_path(path);
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.file_path() == wanted)
            .or_else(|| {
                self.entries
                    .iter()
                    .rev()
                    .find(|entry| is_suffix_match(entry.file_path(), &wanted))
            })
    }

    /// Raw data for `path`; `None` when absent or malformed.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&RawExecutionRecord> {
        self.entry(path).and_then(RecordEntry::record)
    }

    /// Like [`lookup`](Self::lookup), but tells a file the tracer never saw
    /// apart from one whose entry was malformed.
    ///
    /// # Errors
    ///
    /// [`TracecovError::MissingEntry`] when no entry matches `path`.
    pub fn require(&self, path: &str) -> TracecovResult<Option<&RawExecutionRecord>> {
        self.entry(path)
            .map(RecordEntry::record)
            .ok_or_else(|| TracecovError::MissingEntry {
                path: normalize_path(path),
            })
    }
}

fn malformed(file_path: String, line: usize, err: &TracecovError) -> RecordEntry {
    tracing::warn!(path = %file_path, %err, "ignoring malformed coverage entry");
    let message = match err {
        TracecovError::Format { message, .. } => message.clone(),
        other => other.to_string(),
    };
    RecordEntry::Malformed {
        file_path,
        line,
        message,
    }
}

/// Whether `line` is meant as a line list, well-formed or not: bracketed,
/// or made only of digits, signs, commas and spaces.
fn is_list_shaped(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }
    line.starts_with('[')
        || line.ends_with(']')
        || line
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b',' | b' ' | b'\t' | b'+' | b'-'))
}

fn is_suffix_match(a: &str, b: &str) -> bool {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return false;
    }
    long.strip_suffix(short)
        .is_some_and(|head| head.is_empty() || head.ends_with('/'))
}
