//! Result and error types for tracecov.

use thiserror::Error;

/// Result type for tracecov operations
pub type TracecovResult<T> = Result<T, TracecovError>;

/// Errors that can occur in tracecov
#[derive(Debug, Error)]
pub enum TracecovError {
    /// A record entry did not follow the `[n1, n2, ...]` line-list format
    #[error("Malformed record entry at line {line}: {message}")]
    Format {
        /// 1-based line of the record file holding the bad entry
        line: usize,
        /// Error message
        message: String,
    },

    /// No entry for the requested source file
    #[error("No record entry for {path}")]
    MissingEntry {
        /// Normalized source path
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TracecovError {
    /// Create a format error
    #[must_use]
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Whether this error came from a malformed record entry
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = TracecovError::format(4, "missing '['");
        assert!(err.to_string().contains("line 4"));
        assert!(err.to_string().contains("missing '['"));
        assert!(err.is_format());
    }

    #[test]
    fn test_missing_entry_display() {
        let err = TracecovError::MissingEntry {
            path: "pkg/mod.py".to_string(),
        };
        assert!(err.to_string().contains("pkg/mod.py"));
        assert!(!err.is_format());
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TracecovError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
