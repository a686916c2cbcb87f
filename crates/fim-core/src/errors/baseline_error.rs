//! Baseline artifact errors.

use std::path::PathBuf;

use super::error_code::{self, FimErrorCode};

/// The persisted baseline could not be loaded. Fatal for verification.
#[derive(Debug, thiserror::Error)]
pub enum BaselineLoadError {
    #[error("cannot read baseline {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("baseline {path} is not a valid path-to-digest document: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("baseline {path} holds a relative path {entry:?}")]
    RelativeEntry { path: PathBuf, entry: String },

    #[error("baseline {path} holds an invalid digest for {entry}: {digest:?}")]
    InvalidDigest {
        path: PathBuf,
        entry: String,
        digest: String,
    },
}

impl FimErrorCode for BaselineLoadError {
    fn error_code(&self) -> &'static str {
        error_code::BASELINE_LOAD_ERROR
    }
}

/// The baseline could not be written. Fatal for creation.
#[derive(Debug, thiserror::Error)]
pub enum BaselinePersistError {
    #[error("cannot serialize baseline: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot write baseline {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FimErrorCode for BaselinePersistError {
    fn error_code(&self) -> &'static str {
        error_code::BASELINE_PERSIST_ERROR
    }
}
