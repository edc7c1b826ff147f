//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid script file {path}: {message}")]
    InvalidScript { path: PathBuf, message: String },

    #[error("No queries given")]
    NoQueries,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_script(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::InvalidScript {
            path: path.into(),
            message: msg.into(),
        }
    }
}
