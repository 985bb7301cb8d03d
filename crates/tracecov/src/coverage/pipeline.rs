//! End-to-end analysis of one document.

use super::{classify, scan_text, LineClassification, Summary};
use crate::record::RawExecutionRecord;
use serde::{Deserialize, Serialize};

/// Classification of every line of one document plus its summary.
///
/// Computed on demand and owned by the caller; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedFile {
    /// One entry per physical line
    pub classifications: Vec<LineClassification>,
    /// Counts over `classifications`
    pub summary: Summary,
}

impl ClassifiedFile {
    /// Wrap a classification array and summarize it.
    #[must_use]
    pub fn new(classifications: Vec<LineClassification>) -> Self {
        let summary = Summary::from_classifications(&classifications);
        Self {
            classifications,
            summary,
        }
    }

    /// Number of lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.classifications.len()
    }

    /// State of a 0-based line, `None` past the end.
    #[must_use]
    pub fn get(&self, line: usize) -> Option<LineClassification> {
        self.classifications.get(line).copied()
    }
}

/// Build the seed array: `Covered` at every reported line, `Unknown`
/// elsewhere.
///
/// Line numbers past `line_count` (stale data for lines since deleted) and
/// the invalid line number 0 are dropped. `None` yields an all-`Unknown`
/// seed.
#[must_use]
pub fn seed_from_record(
    record: Option<&RawExecutionRecord>,
    line_count: usize,
) -> Vec<LineClassification> {
    let mut seed = vec![LineClassification::Unknown; line_count];
    let Some(record) = record else {
        return seed;
    };

    let mut dropped = 0usize;
    for &number in &record.executed_lines {
        match (number as usize).checked_sub(1) {
            Some(index) if index < line_count => seed[index] = LineClassification::Covered,
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(
            path = %record.file_path,
            dropped,
            line_count,
            "dropped line numbers outside the document"
        );
    }
    seed
}

/// Classify every line of `text` against `record`.
///
/// Pass `None` when the file has no usable raw data (absent from the
/// record, or its entry was malformed).
#[must_use]
pub fn analyze(text: &str, record: Option<&RawExecutionRecord>) -> ClassifiedFile {
    let lines = scan_text(text);
    let seed = seed_from_record(record, lines.len());
    ClassifiedFile::new(classify(&seed, &lines))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use LineClassification::{Covered, Inferred, NotCovered, Unknown};

    #[test]
    fn test_seed_marks_reported_lines() {
        let record = RawExecutionRecord::new("m.py", vec![2, 2, 4]);
        let seed = seed_from_record(Some(&record), 4);
        assert_eq!(seed, vec![Unknown, Covered, Unknown, Covered]);
    }

    #[test]
    fn test_seed_drops_stale_and_zero() {
        let record = RawExecutionRecord::new("m.py", vec![0, 1, 9]);
        let seed = seed_from_record(Some(&record), 2);
        assert_eq!(seed, vec![Covered, Unknown]);
    }

    #[test]
    fn test_seed_without_record() {
        assert_eq!(seed_from_record(None, 3), vec![Unknown; 3]);
    }

    #[test]
    fn test_analyze_module() {
        let text = "\
import os

# Helper banner
def helper(a,
           b):
    \"\"\"Add.\"\"\"
    return a + b

helper(1, 2)
";
        // The tracer reports `import`, the last line of the def header,
        // the return statement and the call.
        let record = RawExecutionRecord::new("m.py", vec![1, 5, 7, 9]);
        let file = analyze(text, Some(&record));

        assert_eq!(file.line_count(), 10);
        assert_eq!(
            file.classifications,
            vec![
                Covered,    // import os
                Inferred,   // blank
                Inferred,   // # Helper banner
                NotCovered, // def helper(a,
                Covered,    //            b):
                Inferred,   // docstring
                Covered,    // return a + b
                Inferred,   // blank
                Covered,    // helper(1, 2)
                Inferred,   // trailing empty line
            ]
        );
        assert_eq!(file.summary.executed_count, 4);
        assert_eq!(file.summary.inferred_count, 5);
        assert_eq!(file.summary.not_covered_count, 1);
    }

    #[test]
    fn test_analyze_without_record() {
        let file = analyze("x = 1\n# c\ny = 2", None);
        assert_eq!(file.classifications, vec![NotCovered, NotCovered, NotCovered]);
    }

    #[test]
    fn test_get_out_of_range() {
        let file = ClassifiedFile::new(vec![Covered]);
        assert_eq!(file.get(0), Some(Covered));
        assert_eq!(file.get(1), None);
    }
}
