//! Error types for the utilisation report.
//!
//! Library crates use [`ReportError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! The row builder itself never fails; these errors only come from the
//! edges (reading the source file, parsing it, loading config).

use std::path::PathBuf;

/// Top-level error type for all utilisation report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Source document could not be decoded.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (unexpected document shape, bad option value).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ReportError::config("unknown output format");
        assert_eq!(err.to_string(), "config error: unknown output format");

        let err = ReportError::parse("expected a JSON array at line 1");
        assert!(err.to_string().starts_with("parse error:"));
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn io_error_carries_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ReportError::io("/tmp/source-data.json", source);
        let msg = err.to_string();
        assert!(msg.contains("source-data.json"));
        assert!(msg.contains("no such file"));
    }
}
