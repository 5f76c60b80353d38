use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading, merging or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// The commented default config could not be written.
    #[error("failed to create default config at {path}: {source}")]
    CreateDefault {
        /// Where the default file was to be written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Parse(String),

    /// A config value failed validation.
    #[error("validation error: {field}: {message}")]
    Validation {
        /// The dotted field path (e.g. `resolver.web_root`).
        field: String,
        /// Human-readable description of the violation.
        message: String,
    },

    /// Reading a config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
