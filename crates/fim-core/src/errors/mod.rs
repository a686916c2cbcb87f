//! Error handling for fim.
//! One error enum per concern, `thiserror` only.

pub mod baseline_error;
pub mod collection_error;
pub mod config_error;
pub mod error_code;
pub mod fim_error;
pub mod fingerprint_error;

pub use baseline_error::{BaselineLoadError, BaselinePersistError};
pub use collection_error::CollectionError;
pub use config_error::ConfigError;
pub use error_code::FimErrorCode;
pub use fim_error::{FimError, FimResult};
pub use fingerprint_error::FingerprintError;
