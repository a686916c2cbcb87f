//! Top-level error returned by the create/verify operations.

use super::error_code::FimErrorCode;
use super::{BaselineLoadError, BaselinePersistError, CollectionError, ConfigError};

/// Aggregates the fatal errors via `From` conversions.
///
/// `FingerprintError` has no variant here: per-file failures are absorbed
/// into the baseline or the report and never abort a run.
#[derive(Debug, thiserror::Error)]
pub enum FimError {
    #[error("collection failed: {0}")]
    Collection(#[from] CollectionError),

    #[error("baseline load failed: {0}")]
    BaselineLoad(#[from] BaselineLoadError),

    #[error("baseline persist failed: {0}")]
    BaselinePersist(#[from] BaselinePersistError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FimErrorCode for FimError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Collection(e) => e.error_code(),
            Self::BaselineLoad(e) => e.error_code(),
            Self::BaselinePersist(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type FimResult<T> = Result<T, FimError>;
