//! LCOV Report Formatter
//!
//! Generates LCOV-format line coverage for CI integration.
//!
//! ## LCOV Format
//!
//! ```text
//! TN:<test name>
//! SF:<source file>
//! DA:<line>,<execution count>
//! LF:<lines found>
//! LH:<lines hit>
//! end_of_record
//! ```
//!
//! Line tracers record presence only, so counts are `1` for covered and
//! inferred lines and `0` for lines not covered. Unknown lines are left out.

use crate::coverage::{ClassifiedFile, LineClassification};
use crate::result::TracecovResult;
use std::path::Path;

/// LCOV format report generator
#[derive(Debug, Default)]
pub struct LcovFormatter<'a> {
    files: Vec<(&'a str, &'a ClassifiedFile)>,
    test_name: Option<String>,
}

impl<'a> LcovFormatter<'a> {
    /// Create an empty formatter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a classified source file
    #[must_use]
    pub fn with_file(mut self, path: &'a str, file: &'a ClassifiedFile) -> Self {
        self.files.push((path, file));
        self
    }

    /// Set the test name for the report
    #[must_use]
    pub fn with_test_name(mut self, name: impl Into<String>) -> Self {
        self.test_name = Some(name.into());
        self
    }

    /// Generate LCOV format report as a string
    #[must_use]
    pub fn generate(&self) -> String {
        use std::fmt::Write;

        let mut output = String::new();

        if let Some(ref name) = self.test_name {
            let _ = writeln!(output, "TN:{name}");
        } else {
            output.push_str("TN:\n");
        }

        for (path, file) in &self.files {
            let _ = writeln!(output, "SF:{path}");

            let mut found = 0;
            let mut hit = 0;
            for (index, cell) in file.classifications.iter().enumerate() {
                let count = match cell {
                    LineClassification::Unknown => continue,
                    LineClassification::NotCovered => 0,
                    LineClassification::Covered | LineClassification::Inferred => 1,
                };
                let _ = writeln!(output, "DA:{},{count}", index + 1);
                found += 1;
                hit += count;
            }

            let _ = writeln!(output, "LF:{found}");
            let _ = writeln!(output, "LH:{hit}");
            output.push_str("end_of_record\n");
        }

        output
    }

    /// Save the LCOV report to a file
    ///
    /// # Errors
    ///
    /// Returns error if file write fails
    pub fn save(&self, path: &Path) -> TracecovResult<()> {
        std::fs::write(path, self.generate())?;
        Ok(())
    }
}
