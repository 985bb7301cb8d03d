//! Gutter rendering and summary reports

use crate::commands::SummaryFormat;
use crate::error::CliResult;
use console::Style;
use serde::Serialize;
use std::fmt::Write;
use tracecov::{ClassifiedFile, LcovFormatter, LineClassification, LineIndex, Summary};

/// Single-character gutter marker for a line state
#[must_use]
pub const fn gutter_marker(state: LineClassification) -> char {
    match state {
        LineClassification::Covered => '+',
        LineClassification::Inferred => '~',
        LineClassification::NotCovered => '-',
        LineClassification::Unknown => ' ',
    }
}

/// Renders source text with a coverage gutter.
#[derive(Debug, Clone, Copy)]
pub struct GutterRenderer {
    use_color: bool,
    line_numbers: bool,
}

impl GutterRenderer {
    /// Create a renderer
    #[must_use]
    pub const fn new(use_color: bool) -> Self {
        Self {
            use_color,
            line_numbers: true,
        }
    }

    /// Show or hide the line number column
    #[must_use]
    pub const fn with_line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    fn style_for(self, state: LineClassification) -> Style {
        let style = match state {
            LineClassification::Covered => Style::new().green(),
            LineClassification::Inferred => Style::new().cyan(),
            LineClassification::NotCovered => Style::new().red().bold(),
            LineClassification::Unknown => Style::new().dim(),
        };
        style.force_styling(self.use_color)
    }

    /// Render one line
    #[must_use]
    pub fn render_line(
        self,
        number: usize,
        width: usize,
        state: LineClassification,
        content: &str,
    ) -> String {
        let marker = self.style_for(state).apply_to(gutter_marker(state));
        if self.line_numbers {
            format!("{marker} {number:>width$} | {content}")
        } else {
            format!("{marker} {content}")
        }
    }

    /// Render every line of `text` against its classification.
    ///
    /// `file` must come from analyzing the same `text`; lines it does not
    /// cover render as unknown.
    #[must_use]
    pub fn render(self, text: &str, file: &ClassifiedFile) -> String {
        let index = LineIndex::new(text);
        let width = index.line_count().to_string().len();
        let mut output = String::new();

        for line in 0..index.line_count() {
            let content = index
                .line_start(line)
                .zip(index.line_end(line, text))
                .and_then(|(start, end)| text.get(start..end))
                .unwrap_or("");
            let state = file.get(line).unwrap_or_default();
            output.push_str(&self.render_line(line + 1, width, state, content));
            output.push('\n');
        }
        output
    }
}

/// Summary of one analyzed source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    /// Source path as given on the command line
    pub path: String,
    /// Line counts
    pub summary: Summary,
    /// Hit lines over classified lines, in percent
    pub coverage_percent: f64,
}

impl FileReport {
    /// Build a report row
    #[must_use]
    pub fn new(path: impl Into<String>, summary: Summary) -> Self {
        Self {
            path: path.into(),
            coverage_percent: summary.coverage_percent(),
            summary,
        }
    }
}

/// Per-file summaries plus their total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// One row per file
    pub files: Vec<FileReport>,
    /// All rows merged
    pub total: FileReport,
}

impl SummaryReport {
    /// Build a report over analyzed files
    #[must_use]
    pub fn new(files: &[(String, ClassifiedFile)]) -> Self {
        let rows: Vec<FileReport> = files
            .iter()
            .map(|(path, file)| FileReport::new(path.clone(), file.summary))
            .collect();
        let mut total = Summary::default();
        for row in &rows {
            total.merge(&row.summary);
        }
        Self {
            files: rows,
            total: FileReport::new("total", total),
        }
    }

    /// Human-readable table
    #[must_use]
    pub fn to_text(&self) -> String {
        let width = self
            .files
            .iter()
            .map(|row| row.path.len())
            .chain(std::iter::once(self.total.path.len()))
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        for row in self.files.iter().chain(std::iter::once(&self.total)) {
            let _ = writeln!(output, "{:<width$}  {}", row.path, row.summary);
        }
        output
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render analyzed files in the requested format
pub fn render_summary(
    files: &[(String, ClassifiedFile)],
    format: SummaryFormat,
    test_name: Option<&str>,
) -> CliResult<String> {
    match format {
        SummaryFormat::Text => Ok(SummaryReport::new(files).to_text()),
        SummaryFormat::Json => SummaryReport::new(files).to_json(),
        SummaryFormat::Lcov => {
            let mut formatter = LcovFormatter::new();
            if let Some(name) = test_name {
                formatter = formatter.with_test_name(name);
            }
            for (path, file) in files {
                formatter = formatter.with_file(path, file);
            }
            Ok(formatter.generate())
        }
    }
}
