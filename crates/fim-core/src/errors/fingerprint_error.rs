//! Per-file fingerprint errors.

use std::path::PathBuf;

use super::error_code::{self, FimErrorCode};

/// A single file could not be hashed.
///
/// Never fatal on its own: the builder omits the file and the comparator
/// turns it into a `DELETED` or `MISSING` finding.
#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FingerprintError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. } | Self::Read { path, .. } => path,
        }
    }

    pub fn io_error(&self) -> &std::io::Error {
        match self {
            Self::Open { source, .. } | Self::Read { source, .. } => source,
        }
    }

    /// True when the file no longer exists, as opposed to being unreadable.
    pub fn is_not_found(&self) -> bool {
        self.io_error().kind() == std::io::ErrorKind::NotFound
    }
}

impl FimErrorCode for FingerprintError {
    fn error_code(&self) -> &'static str {
        error_code::FINGERPRINT_ERROR
    }
}
