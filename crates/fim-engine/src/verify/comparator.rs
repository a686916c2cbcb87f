//! Three-way classification of current files against a baseline.

use std::path::{Path, PathBuf};
use std::time::Instant;

use fim_core::errors::{BaselineLoadError, FingerprintError};
use fim_core::events::FimEventHandler;
use fim_core::types::FxHashSet;

use super::types::{DiffEntry, IntegrityStatus, Report};
use crate::baseline::{load_baseline, Baseline, Digest};
use crate::fingerprint::{fingerprint_all, FingerprintRecord};
use crate::stats::RunStats;

/// Classify fingerprint records against `baseline`.
///
/// Every path in `records` and every path in `baseline` gets exactly one
/// entry. A path present in both is resolved from its record; baseline
/// paths never attempted are swept up as `DELETED` afterwards. Entries are
/// sorted by path. Neither input is modified.
pub fn classify(baseline: &Baseline, records: &[FingerprintRecord]) -> Vec<DiffEntry> {
    let mut entries = Vec::with_capacity(records.len().max(baseline.len()));
    let mut attempted: FxHashSet<&Path> = FxHashSet::default();
    let mut attempted_keys: FxHashSet<&str> = FxHashSet::default();

    for record in records {
        if !attempted.insert(record.path.as_path()) {
            continue;
        }
        if let Some(key) = record.path.to_str() {
            attempted_keys.insert(key);
        }
        let old = baseline.get(&record.path);
        entries.push(classify_record(&record.path, old, &record.outcome));
    }

    for (path, digest) in baseline.iter() {
        let key = path.to_str().unwrap_or_default();
        if !attempted_keys.contains(key) {
            entries.push(DiffEntry {
                path: path.to_path_buf(),
                status: IntegrityStatus::Deleted,
                old_digest: Some(digest.clone()),
                new_digest: None,
                message: "file deleted".to_string(),
            });
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

fn classify_record(
    path: &Path,
    old: Option<&Digest>,
    outcome: &Result<Digest, FingerprintError>,
) -> DiffEntry {
    let path = path.to_path_buf();
    match (outcome, old) {
        (Ok(new), Some(old)) if new == old => DiffEntry {
            path,
            status: IntegrityStatus::Ok,
            old_digest: Some(old.clone()),
            new_digest: Some(new.clone()),
            message: String::new(),
        },
        (Ok(new), Some(old)) => DiffEntry {
            path,
            status: IntegrityStatus::Modified,
            old_digest: Some(old.clone()),
            new_digest: Some(new.clone()),
            message: "hash mismatch".to_string(),
        },
        (Ok(new), None) => DiffEntry {
            path,
            status: IntegrityStatus::Added,
            old_digest: None,
            new_digest: Some(new.clone()),
            message: "new file".to_string(),
        },
        (Err(e), Some(old)) => DiffEntry {
            path,
            status: IntegrityStatus::Deleted,
            old_digest: Some(old.clone()),
            new_digest: None,
            message: failure_message(e, "file deleted"),
        },
        (Err(e), None) => DiffEntry {
            path,
            status: IntegrityStatus::Missing,
            old_digest: None,
            new_digest: None,
            message: failure_message(e, "file missing and not in baseline"),
        },
    }
}

fn failure_message(e: &FingerprintError, not_found: &str) -> String {
    if e.is_not_found() {
        not_found.to_string()
    } else {
        format!("file unreadable: {}", e.io_error())
    }
}

/// Fingerprint `current` and classify it against an in-memory baseline.
pub fn compare(
    baseline: &Baseline,
    current: &[PathBuf],
    threads: usize,
    handler: &dyn FimEventHandler,
) -> Report {
    let hash_start = Instant::now();
    let records = fingerprint_all(current, threads, handler);
    let hash_ms = hash_start.elapsed().as_millis() as u64;

    let compare_start = Instant::now();
    let entries = classify(baseline, &records);
    let hash_failures = records.iter().filter(|r| r.outcome.is_err()).count();

    Report::new(
        entries,
        RunStats {
            files_collected: current.len(),
            files_hashed: records.len() - hash_failures,
            hash_failures,
            hash_ms,
            compare_ms: compare_start.elapsed().as_millis() as u64,
            ..Default::default()
        },
    )
}

/// Load the baseline at `baseline_path` and compare `current` against it.
///
/// A baseline that cannot be read or parsed aborts before any file is
/// hashed; no partial report is produced.
pub fn compare_with_baseline_file(
    baseline_path: &Path,
    current: &[PathBuf],
    threads: usize,
    handler: &dyn FimEventHandler,
) -> Result<Report, BaselineLoadError> {
    let baseline = load_baseline(baseline_path)?;
    Ok(compare(&baseline, current, threads, handler))
}
