//! Glob-based exclusion of walked paths.

use std::path::Path;

use fim_core::errors::CollectionError;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiled `scan.exclude` patterns.
///
/// Patterns are matched against the path relative to the directory being
/// walked, e.g. `*.log` or `cache/**`. A matching directory is not descended.
#[derive(Debug, Clone)]
pub struct ExcludePatterns {
    set: GlobSet,
}

impl ExcludePatterns {
    pub fn new(patterns: &[String]) -> Result<Self, CollectionError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| CollectionError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| CollectionError::InvalidPattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;
        Ok(Self { set })
    }

    pub fn is_excluded(&self, relative: &Path) -> bool {
        !self.set.is_empty() && self.set.is_match(relative)
    }
}
