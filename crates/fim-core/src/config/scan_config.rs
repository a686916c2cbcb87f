//! Collection and fingerprinting configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_THREADS;

/// Configuration for path collection and hashing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Worker threads for fingerprinting. 0 = rayon default.
    pub threads: Option<usize>,
    /// Follow symbolic links while walking. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Glob patterns, relative to the walked directory, that are never collected.
    pub exclude: Vec<String>,
}

impl ScanConfig {
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
