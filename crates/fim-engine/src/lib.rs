//! fim-engine: collects files, fingerprints them with SHA-256, persists
//! baselines and classifies later states against them.
//!
//! ```text
//! collector ──▶ fingerprint ──▶ baseline::builder ──▶ baseline::store
//!                    │
//!                    └────────▶ verify::comparator ◀── baseline::store
//! ```

pub mod baseline;
pub mod collector;
pub mod fingerprint;
pub mod pipeline;
pub mod stats;
pub mod verify;

pub use baseline::{Baseline, Digest};
pub use collector::{collect, CollectedPaths, TargetSpec};
pub use fingerprint::{fingerprint, fingerprint_bytes};
pub use pipeline::{create_baseline, verify_baseline, BuildOutcome};
pub use stats::RunStats;
pub use verify::{DiffEntry, IntegrityStatus, Report, ReportSummary};
