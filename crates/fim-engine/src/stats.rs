//! Run statistics shared by baseline creation and verification.

use serde::Serialize;

/// Aggregate statistics for one run. Durations vary between runs; nothing
/// here takes part in report equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub files_collected: usize,
    pub files_hashed: usize,
    pub hash_failures: usize,
    pub collect_ms: u64,
    pub hash_ms: u64,
    pub compare_ms: u64,
}
