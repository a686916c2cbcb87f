//! Event handler that turns engine events into log lines.

use fim_core::events::*;

/// Logs pipeline progress under the `fim_cli` target.
pub struct ProgressHandler;

impl FimEventHandler for ProgressHandler {
    fn on_collect_complete(&self, event: &CollectCompleteEvent) {
        tracing::info!(
            files = event.files,
            missing = event.missing,
            duration_ms = event.duration_ms,
            "collected targets"
        );
    }

    fn on_file_hashed(&self, event: &FileHashedEvent) {
        tracing::trace!(path = %event.path.display(), "hashed");
    }

    fn on_file_error(&self, event: &FileErrorEvent) {
        tracing::debug!(path = %event.path.display(), error = %event.message, "hash failed");
    }

    fn on_baseline_written(&self, event: &BaselineWrittenEvent) {
        tracing::debug!(path = %event.path.display(), entries = event.entries, "baseline written");
    }

    fn on_verify_complete(&self, event: &VerifyCompleteEvent) {
        tracing::debug!(duration_ms = event.duration_ms, "verification finished");
    }
}
