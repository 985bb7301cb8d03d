//! File-level coverage counts.

use super::LineClassification;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coverage summary statistics for one file (or, merged, for many).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of physical lines
    pub line_count: usize,
    /// Lines the tracer reported executed
    pub executed_count: usize,
    /// Lines inferred executed
    pub inferred_count: usize,
    /// Executable lines with no evidence of execution
    pub not_covered_count: usize,
    /// Partially executed lines; line tracers never produce these
    pub partial_count: usize,
}

impl Summary {
    /// Count lines per classification.
    #[must_use]
    pub fn from_classifications(cells: &[LineClassification]) -> Self {
        let mut summary = Self {
            line_count: cells.len(),
            ..Self::default()
        };
        for cell in cells {
            match cell {
                LineClassification::Covered => summary.executed_count += 1,
                LineClassification::Inferred => summary.inferred_count += 1,
                LineClassification::NotCovered => summary.not_covered_count += 1,
                LineClassification::Unknown => {}
            }
        }
        summary
    }

    /// Lines counted as hit (executed or inferred)
    #[must_use]
    pub const fn hit_count(&self) -> usize {
        self.executed_count + self.inferred_count
    }

    /// Lines with a definite verdict
    #[must_use]
    pub const fn classified_count(&self) -> usize {
        self.hit_count() + self.not_covered_count
    }

    /// Percentage of classified lines that are hit
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        let classified = self.classified_count();
        if classified == 0 {
            return 100.0; // Vacuously true
        }
        (self.hit_count() as f64 / classified as f64) * 100.0
    }

    /// Add another summary's counts into this one
    pub fn merge(&mut self, other: &Self) {
        self.line_count += other.line_count;
        self.executed_count += other.executed_count;
        self.inferred_count += other.inferred_count;
        self.not_covered_count += other.not_covered_count;
        self.partial_count += other.partial_count;
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% ({} executed, {} inferred, {} not covered, {} lines)",
            self.coverage_percent(),
            self.executed_count,
            self.inferred_count,
            self.not_covered_count,
            self.line_count
        )
    }
}
