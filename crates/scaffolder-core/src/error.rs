//! Error types for the scaffolding pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library layers
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

/// Failures surfaced by the scaffolding pipeline
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The operator aborted the interactive flow
    #[error("Operation cancelled")]
    OperatorCancelled,

    /// A manifest file could not be parsed as JSON
    #[error("Malformed manifest {}: {source}", path.display())]
    MalformedManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No template definition is registered under the requested name
    #[error("Unknown template {name} (available: {})", available.join(", "))]
    UnknownTemplate {
        name: String,
        available: Vec<String>,
    },

    /// The destination is not empty and overwriting was not confirmed
    #[error("Target directory {} is not empty", path.display())]
    UnsafeOverwrite { path: PathBuf },

    /// A feature flag was given a value outside its declared choices
    #[error("Invalid value for --{flag}: {reason}")]
    InvalidFlag {
        flag: String,
        reason: String,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The prompt engine failed for a reason other than cancellation
    #[error("Prompt failed: {0}")]
    Prompt(#[source] io::Error),
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Map a prompt engine error, treating interruption as operator cancellation
    pub fn from_prompt(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::Interrupted {
            Self::OperatorCancelled
        } else {
            Self::Prompt(err)
        }
    }

    /// Whether this error is the operator backing out rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::OperatorCancelled | Self::UnsafeOverwrite { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_prompt_is_cancellation() {
        let err = ScaffoldError::from_prompt(io::Error::new(io::ErrorKind::Interrupted, "esc"));
        assert!(matches!(err, ScaffoldError::OperatorCancelled));
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_other_prompt_errors_are_failures() {
        let err = ScaffoldError::from_prompt(io::Error::new(io::ErrorKind::BrokenPipe, "tty"));
        assert!(matches!(err, ScaffoldError::Prompt(_)));
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_unsafe_overwrite_counts_as_cancellation() {
        let err = ScaffoldError::UnsafeOverwrite {
            path: PathBuf::from("site"),
        };
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "Target directory site is not empty");
    }

    #[test]
    fn test_unknown_template_lists_available() {
        let err = ScaffoldError::UnknownTemplate {
            name: "react".to_string(),
            available: vec!["vue-website".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown template react (available: vue-website)"
        );
    }
}
