//! Result and error types for firstrun.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for firstrun operations
pub type FirstRunResult<T> = Result<T, FirstRunError>;

/// Errors that can occur in firstrun
#[derive(Debug, Error)]
pub enum FirstRunError {
    /// Durable settings storage could not be read or written
    #[error("Settings storage unavailable at {}: {message}", path.display())]
    Storage {
        /// Location of the settings file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Settings file exists but does not hold what we expect
    #[error("Corrupt settings store at {}: {message}", path.display())]
    CorruptStore {
        /// Location of the settings file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Page-object assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Operation called in the wrong state
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Fixture setup or teardown failed
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FirstRunError {
    /// Create a storage error for the given settings file
    #[must_use]
    pub fn storage(path: &Path, message: impl Into<String>) -> Self {
        Self::Storage {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a corrupt-store error for the given settings file
    #[must_use]
    pub fn corrupt_store(path: &Path, message: impl Into<String>) -> Self {
        Self::CorruptStore {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create an invalid-state error
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a fixture error
    #[must_use]
    pub fn fixture(message: impl Into<String>) -> Self {
        Self::Fixture {
            message: message.into(),
        }
    }
}
