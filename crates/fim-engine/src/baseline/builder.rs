//! Baseline construction from collected paths.

use std::path::PathBuf;

use fim_core::events::FimEventHandler;

use super::types::Baseline;
use crate::fingerprint::{fingerprint_all, FingerprintRecord};

/// A freshly built baseline plus the paths left out of it.
#[derive(Debug, Default)]
pub struct BuiltBaseline {
    pub baseline: Baseline,
    /// Paths that could not be fingerprinted or persisted, in input order.
    pub omitted: Vec<PathBuf>,
}

/// Fingerprint `paths` and record every success.
///
/// A file that cannot be read is left out of the baseline rather than
/// failing the build, so the baseline only holds files that were readable
/// when it was created.
pub fn build_baseline(
    paths: &[PathBuf],
    threads: usize,
    handler: &dyn FimEventHandler,
) -> BuiltBaseline {
    let records = fingerprint_all(paths, threads, handler);
    from_records(records)
}

pub(crate) fn from_records(records: Vec<FingerprintRecord>) -> BuiltBaseline {
    let mut built = BuiltBaseline::default();
    for record in records {
        match record.outcome {
            Ok(digest) => {
                if !built.baseline.insert(&record.path, digest) {
                    tracing::warn!(
                        path = %record.path.display(),
                        "omitting path that is not valid UTF-8"
                    );
                    built.omitted.push(record.path);
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %e.path().display(),
                    error = %e.io_error(),
                    "omitting unreadable file from baseline"
                );
                built.omitted.push(record.path);
            }
        }
    }
    built
}
