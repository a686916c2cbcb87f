//! Event payload types.

use std::path::PathBuf;

/// Payload for `on_collect_complete`.
#[derive(Debug, Clone)]
pub struct CollectCompleteEvent {
    pub files: usize,
    /// Explicitly listed entries that did not exist.
    pub missing: usize,
    pub duration_ms: u64,
}

/// Payload for `on_file_hashed`.
#[derive(Debug, Clone)]
pub struct FileHashedEvent {
    pub path: PathBuf,
}

/// Payload for `on_file_error`.
#[derive(Debug, Clone)]
pub struct FileErrorEvent {
    pub path: PathBuf,
    pub message: String,
}

/// Payload for `on_baseline_written`.
#[derive(Debug, Clone)]
pub struct BaselineWrittenEvent {
    pub path: PathBuf,
    pub entries: usize,
}

/// Payload for `on_verify_complete`.
#[derive(Debug, Clone)]
pub struct VerifyCompleteEvent {
    pub ok: usize,
    pub modified: usize,
    pub added: usize,
    pub deleted: usize,
    pub missing: usize,
    pub duration_ms: u64,
}
