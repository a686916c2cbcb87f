//! Path collection errors.

use std::path::PathBuf;

use super::error_code::{self, FimErrorCode};

/// Errors that abort path collection before any file is fingerprinted.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("cannot walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("symbolic link loop at {path} (points back to {ancestor})")]
    SymlinkLoop { path: PathBuf, ancestor: PathBuf },

    #[error("cannot read list file {path}: {source}")]
    ListFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid exclude pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl FimErrorCode for CollectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SymlinkLoop { .. } => error_code::SYMLINK_LOOP,
            _ => error_code::COLLECTION_ERROR,
        }
    }
}
