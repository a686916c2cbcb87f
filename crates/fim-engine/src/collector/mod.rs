//! Path collector: resolves a target into a deduplicated set of absolute
//! regular-file paths.

pub mod exclude;
pub mod target;
pub mod walker;

pub use exclude::ExcludePatterns;
pub use target::TargetSpec;
pub use walker::{collect, normalize_lexically, CollectedPaths};
