//! Error handling for the Duet CLI.
//!
//! `CliError` wraps the errors of the library crates; `main` turns it into a
//! [`miette::Report`] through [`cli_error_to_miette`].

mod miette;

use std::path::PathBuf;

use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings or options could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] duet_config::ConfigError),

    /// The factory rejected its inputs
    #[error(transparent)]
    Bundler(#[from] duet_bundler::Error),

    /// Project root does not exist or is not a directory
    #[error("Project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_not_found_shows_path() {
        let err = CliError::RootNotFound(PathBuf::from("/missing/app"));
        assert_eq!(err.to_string(), "Project root not found: /missing/app");
    }

    #[test]
    fn bundler_errors_are_transparent() {
        let err = CliError::from(duet_bundler::Error::missing(duet_bundler::Axis::Target));
        assert_eq!(err.to_string(), r#"You must provide a "target" (client|server)"#);
    }

    #[test]
    fn config_errors_are_prefixed() {
        let err = CliError::from(duet_config::ConfigError::InvalidSetting {
            field: "server_port",
            message: "must not be 0".to_string(),
        });
        assert!(err.to_string().starts_with("Configuration error: "));
    }
}
