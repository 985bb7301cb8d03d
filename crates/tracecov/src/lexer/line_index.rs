//! Physical line table for a document.

/// Byte offsets of every physical line start.
///
/// A document with `n` line terminators has `n + 1` lines; the text after
/// the last terminator (possibly empty) is the final line. `\n`, `\r\n`
/// and a lone `\r` each end a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Build the line table for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => starts.push(i + 1),
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    starts.push(i + 1);
                }
                _ => {}
            }
            i += 1;
        }
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of physical lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Start offset of `line` (0-based), `None` past the end.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.starts.get(line).copied()
    }

    /// Offset just past the content of `line`, terminator excluded.
    #[must_use]
    pub fn line_end(&self, line: usize, text: &str) -> Option<usize> {
        let start = self.line_start(line)?;
        let next = self.starts.get(line + 1).copied().unwrap_or(self.len);
        let bytes = text.as_bytes();
        let mut end = next;
        while end > start && matches!(bytes.get(end - 1), Some(b'\n' | b'\r')) {
            end -= 1;
        }
        Some(end)
    }

    /// Offset of the first non-blank byte on `line`, or the line start
    /// when the line holds nothing but spaces, tabs and form feeds.
    #[must_use]
    pub fn first_significant(&self, line: usize, text: &str) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = self.line_end(line, text)?;
        let offset = text.as_bytes()[start..end]
            .iter()
            .position(|b| !matches!(b, b' ' | b'\t' | b'\x0c'))
            .map_or(start, |pos| start + pos);
        Some(offset)
    }
}
