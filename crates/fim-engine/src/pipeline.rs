//! The two operations the engine exposes: create a baseline, verify one.

use std::path::{Path, PathBuf};
use std::time::Instant;

use fim_core::config::FimConfig;
use fim_core::errors::FimResult;
use fim_core::events::{
    BaselineWrittenEvent, CollectCompleteEvent, FimEventHandler, VerifyCompleteEvent,
};

use crate::baseline::{build_baseline, load_baseline, persist_baseline, Baseline};
use crate::collector::{collect, CollectedPaths, TargetSpec};
use crate::stats::RunStats;
use crate::verify::{compare, Report};

/// What `create_baseline` wrote and what it left out.
#[derive(Debug)]
pub struct BuildOutcome {
    pub baseline: Baseline,
    pub output: PathBuf,
    /// Collected files that could not be fingerprinted.
    pub omitted: Vec<PathBuf>,
    /// Listed targets that did not exist.
    pub missing: Vec<PathBuf>,
    pub stats: RunStats,
}

/// Collect `target`, fingerprint every file and write the baseline to `output`.
///
/// Fails only when the target cannot be enumerated or the baseline cannot be
/// written. Unreadable files are omitted; absent listed targets are logged.
pub fn create_baseline(
    target: &TargetSpec,
    config: &FimConfig,
    output: &Path,
    handler: &dyn FimEventHandler,
) -> FimResult<BuildOutcome> {
    let (collected, collect_ms) = timed_collect(target, config, handler)?;
    for path in &collected.missing {
        tracing::warn!(path = %path.display(), "listed target does not exist, not recorded");
    }

    let hash_start = Instant::now();
    let built = build_baseline(&collected.files, config.scan.effective_threads(), handler);
    let hash_ms = hash_start.elapsed().as_millis() as u64;

    persist_baseline(&built.baseline, output)?;
    handler.on_baseline_written(&BaselineWrittenEvent {
        path: output.to_path_buf(),
        entries: built.baseline.len(),
    });

    let stats = RunStats {
        files_collected: collected.len(),
        files_hashed: built.baseline.len(),
        hash_failures: built.omitted.len(),
        collect_ms,
        hash_ms,
        compare_ms: 0,
    };
    tracing::info!(
        files_hashed = stats.files_hashed,
        hash_failures = stats.hash_failures,
        hash_ms = stats.hash_ms,
        output = %output.display(),
        "baseline created"
    );

    Ok(BuildOutcome {
        baseline: built.baseline,
        output: output.to_path_buf(),
        omitted: built.omitted,
        missing: collected.missing,
        stats,
    })
}

/// Load the baseline at `baseline_path`, collect `target` and classify every
/// path in baseline ∪ collected.
///
/// The baseline is loaded first: a bad artifact aborts before the target is
/// walked or any file is hashed.
pub fn verify_baseline(
    baseline_path: &Path,
    target: &TargetSpec,
    config: &FimConfig,
    handler: &dyn FimEventHandler,
) -> FimResult<Report> {
    let baseline = load_baseline(baseline_path)?;
    let (collected, collect_ms) = timed_collect(target, config, handler)?;
    // Tracked ones surface as DELETED entries.
    for path in collected.missing.iter().filter(|p| !baseline.contains(p.as_path())) {
        tracing::warn!(path = %path.display(), "listed target does not exist and is not tracked");
    }

    let mut report = compare(
        &baseline,
        &collected.files,
        config.scan.effective_threads(),
        handler,
    );
    report.stats.collect_ms = collect_ms;

    let summary = report.summary;
    handler.on_verify_complete(&VerifyCompleteEvent {
        ok: summary.ok,
        modified: summary.modified,
        added: summary.added,
        deleted: summary.deleted,
        missing: summary.missing,
        duration_ms: collect_ms + report.stats.hash_ms + report.stats.compare_ms,
    });
    tracing::info!(
        ok = summary.ok,
        modified = summary.modified,
        added = summary.added,
        deleted = summary.deleted,
        missing = summary.missing,
        compare_ms = report.stats.compare_ms,
        "verification complete"
    );
    Ok(report)
}

fn timed_collect(
    target: &TargetSpec,
    config: &FimConfig,
    handler: &dyn FimEventHandler,
) -> FimResult<(CollectedPaths, u64)> {
    let start = Instant::now();
    let collected = collect(target, &config.scan)?;
    let collect_ms = start.elapsed().as_millis() as u64;

    handler.on_collect_complete(&CollectCompleteEvent {
        files: collected.len(),
        missing: collected.missing.len(),
        duration_ms: collect_ms,
    });
    tracing::debug!(
        files_collected = collected.len(),
        collect_ms,
        "collection complete"
    );
    Ok((collected, collect_ms))
}
