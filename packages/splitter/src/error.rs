//! Error types for the splitter.
//!
//! Malformed TOC lines and unmatched labels are not errors: they are
//! reported as typed outcomes on the listing and the split report. Only
//! failures that make the run meaningless end up here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// Reading an input file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an output file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),

    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOC record uses a level outside the chapter..subsubsection hierarchy.
    #[error("Unknown heading level '{level}' at line {line}. Expected chapter, section, subsection or subsubsection")]
    UnknownLevel { level: String, line: usize },

    /// TOC records are not in ascending source order.
    #[error("TOC record '{label}' at line {line} does not follow the previous record at line {previous}")]
    OutOfOrder {
        previous: usize,
        line: usize,
        label: String,
    },
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_display() {
        let err = SplitterError::UnknownLevel {
            level: "part".to_string(),
            line: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("'part'"));
        assert!(msg.contains("line 12"));
    }

    #[test]
    fn test_out_of_order_display() {
        let err = SplitterError::OutOfOrder {
            previous: 40,
            line: 30,
            label: "sec:calibration".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "TOC record 'sec:calibration' at line 30 does not follow the previous record at line 40"
        );
    }

    #[test]
    fn test_read_file_display_includes_path() {
        let err = SplitterError::ReadFile {
            path: PathBuf::from("thesis/main.tex"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("thesis/main.tex"));
    }
}
