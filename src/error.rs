//! Custom error types for prd-split.
//!
//! Every fatal condition of a run is a variant of [`SplitError`]. Anything
//! that can go wrong while synthesizing an individual task is resolved
//! locally with a fallback and never surfaces here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for prd-split operations
#[derive(Error, Debug)]
pub enum SplitError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// The PRD path does not exist
    #[error("PRD file not found: {}", path.display())]
    PrdNotFound { path: PathBuf },

    /// The PRD is empty or whitespace-only
    #[error("PRD file is empty; provide a markdown document with requirements.")]
    EmptyPrd,

    /// Section extraction produced nothing
    #[error("Could not derive sections from PRD content.")]
    NoSections,

    /// Every candidate was dropped or none were found
    #[error("No task candidates were extracted from the PRD.")]
    NoTaskCandidates,

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Initial state outside the enumerated set
    #[error("Invalid task state '{value}' (expected one of: open, in_progress, ready4review, done)")]
    InvalidState { value: String },

    /// Failed to load the configuration file
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SplitError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(value: impl Into<String>) -> Self {
        Self::InvalidState {
            value: value.into(),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if the run was misconfigured rather than the PRD being unusable.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidState { .. } | Self::Config { .. })
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            2
        } else {
            1
        }
    }
}

/// Type alias for prd-split results
pub type Result<T> = std::result::Result<T, SplitError>;

/// Extension trait for converting anyhow errors to SplitError
pub trait IntoSplitError<T> {
    fn into_split_config_at(self, path: &std::path::Path) -> Result<T>;
}

impl<T, E: Into<anyhow::Error>> IntoSplitError<T> for std::result::Result<T, E> {
    fn into_split_config_at(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| SplitError::config_with_path(format!("{:#}", e.into()), path.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_messages() {
        assert_eq!(
            SplitError::EmptyPrd.to_string(),
            "PRD file is empty; provide a markdown document with requirements."
        );
        assert_eq!(
            SplitError::NoSections.to_string(),
            "Could not derive sections from PRD content."
        );
        assert_eq!(
            SplitError::NoTaskCandidates.to_string(),
            "No task candidates were extracted from the PRD."
        );
        let err = SplitError::PrdNotFound {
            path: PathBuf::from("/tmp/missing.md"),
        };
        assert_eq!(err.to_string(), "PRD file not found: /tmp/missing.md");
    }

    #[test]
    fn test_invalid_state_message() {
        let err = SplitError::invalid_state("blocked");
        assert!(err.to_string().contains("'blocked'"));
        assert!(err.to_string().contains("ready4review"));
    }

    #[test]
    fn test_is_config_error() {
        assert!(!SplitError::EmptyPrd.is_config_error());
        assert!(!SplitError::NoTaskCandidates.is_config_error());
        assert!(SplitError::config_with_path("bad", PathBuf::from("a.toml")).is_config_error());
        assert!(SplitError::invalid_state("x").is_config_error());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SplitError::EmptyPrd.exit_code(), 1);
        assert_eq!(SplitError::NoSections.exit_code(), 1);
        assert_eq!(SplitError::invalid_state("x").exit_code(), 2);
        assert_eq!(SplitError::config_with_path("x", PathBuf::from("a.toml")).exit_code(), 2);
    }

    #[test]
    fn test_config_with_path() {
        let path = PathBuf::from("/test/prd-split.toml");
        let err = SplitError::config_with_path("failed to parse", path.clone());
        if let SplitError::Config {
            message,
            path: opt_path,
        } = err
        {
            assert_eq!(message, "failed to parse");
            assert_eq!(opt_path, Some(path));
        } else {
            panic!("Wrong error variant");
        }
    }

    #[test]
    fn test_into_split_error_trait() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let converted = result.into_split_config_at(std::path::Path::new("/cfg/prd-split.toml"));
        match converted {
            Err(SplitError::Config { message, path }) => {
                assert!(message.contains("file not found"));
                assert_eq!(path, Some(PathBuf::from("/cfg/prd-split.toml")));
            }
            other => panic!("Wrong result: {other:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SplitError = io.into();
        assert!(matches!(err, SplitError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
