//! Configuration errors.

use super::error_code::{self, FimErrorCode};

/// Errors that can occur while loading and validating `FimConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl FimErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
