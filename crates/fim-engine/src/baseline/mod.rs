//! Baselines: the persisted path-to-digest record a later verification
//! compares against.

pub mod builder;
pub mod store;
pub mod types;

pub use builder::{build_baseline, BuiltBaseline};
pub use store::{load_baseline, persist_baseline};
pub use types::{Baseline, Digest};
