//! Verification: classify every tracked path against a baseline.

pub mod comparator;
pub mod types;

pub use comparator::{classify, compare, compare_with_baseline_file};
pub use types::{DiffEntry, IntegrityStatus, Report, ReportSummary};
