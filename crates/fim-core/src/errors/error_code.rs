//! FimErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this so the CLI (and JSON consumers) can
/// match on a fixed code instead of parsing display strings.
pub trait FimErrorCode {
    /// Returns the error code string (e.g., "BASELINE_LOAD_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const COLLECTION_ERROR: &str = "COLLECTION_ERROR";
pub const FINGERPRINT_ERROR: &str = "FINGERPRINT_ERROR";
pub const BASELINE_LOAD_ERROR: &str = "BASELINE_LOAD_ERROR";
pub const BASELINE_PERSIST_ERROR: &str = "BASELINE_PERSIST_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SYMLINK_LOOP: &str = "SYMLINK_LOOP";
