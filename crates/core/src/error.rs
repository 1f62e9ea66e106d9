//! Core error types for taskdag operations.
//!
//! The graph pipeline itself never fails: malformed edges are dropped and
//! cycles fall back to level 0. This type covers reading task snapshots; the
//! config, geometry, viewport and collaborator modules carry their own error
//! enums.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read file '{path}': {reason}")]
    FileReadFailed { path: PathBuf, reason: String },

    #[error("JSON parse error: {reason}")]
    JsonParseFailed { reason: String },
}

impl Error {
    /// Create a file read error.
    pub fn file_read_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FileReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse_failed(reason: impl Into<String>) -> Self {
        Self::JsonParseFailed {
            reason: reason.into(),
        }
    }
}

/// The standard Result type for taskdag operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_read_display() {
        let err = Error::file_read_failed("/tmp/tasks.json", "not found");
        assert_eq!(
            err.to_string(),
            "failed to read file '/tmp/tasks.json': not found"
        );
    }

    #[test]
    fn test_json_parse_display() {
        let err = Error::json_parse_failed("expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "JSON parse error: expected value at line 1 column 1"
        );
    }
}
