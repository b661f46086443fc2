//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core library error
    #[error("{0}")]
    FirstRun(#[from] firstrun::FirstRunError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use firstrun::FirstRunError;
    use std::path::Path;

    #[test]
    fn test_library_error_passes_message_through() {
        let err: CliError =
            FirstRunError::corrupt_store(Path::new("s.json"), "expected a JSON object").into();
        assert!(err.to_string().starts_with("Corrupt settings store"));
    }

    #[test]
    fn test_corrupt_store_surfaces_through_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "42").unwrap();

        let err = crate::handlers::read_status(&path).unwrap_err();
        assert!(matches!(
            err,
            CliError::FirstRun(FirstRunError::CorruptStore { .. })
        ));
    }

    #[test]
    fn test_store_under_a_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = crate::handlers::launch_app(
            &blocker.join("settings.json"),
            &["-skipOnboarding".to_string()],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::FirstRun(FirstRunError::Storage { .. })));
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CliError = io.into();
        assert!(err.to_string().contains("I/O error"));
    }
}
