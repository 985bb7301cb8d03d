//! Per-line coverage states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coverage state of one physical line.
///
/// Replaces the negative hit-count sentinels line tracers traditionally
/// overload into their count arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineClassification {
    /// Not classified with confidence; deliberately left unresolved
    #[default]
    Unknown,
    /// No direct evidence, but adjacent to executed code
    Inferred,
    /// Executable line with no evidence of execution
    NotCovered,
    /// Reported executed by the tracer
    Covered,
}

impl LineClassification {
    /// Covered or inferred
    #[inline]
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Covered | Self::Inferred)
    }

    /// Anything but `Unknown`
    #[inline]
    #[must_use]
    pub const fn is_classified(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Short lowercase label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Inferred => "inferred",
            Self::NotCovered => "not_covered",
            Self::Covered => "covered",
        }
    }
}

impl fmt::Display for LineClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(LineClassification::default(), LineClassification::Unknown);
    }

    #[test]
    fn test_is_hit() {
        assert!(LineClassification::Covered.is_hit());
        assert!(LineClassification::Inferred.is_hit());
        assert!(!LineClassification::NotCovered.is_hit());
        assert!(!LineClassification::Unknown.is_hit());
    }

    #[test]
    fn test_serde_labels_match_display() {
        for c in [
            LineClassification::Unknown,
            LineClassification::Inferred,
            LineClassification::NotCovered,
            LineClassification::Covered,
        ] {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{c}\""));
        }
    }
}
