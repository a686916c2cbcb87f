//! FimEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Observer for pipeline progress.
///
/// Handlers only override the events they care about. `Send + Sync` because
/// `on_file_hashed` and `on_file_error` fire from hashing worker threads.
pub trait FimEventHandler: Send + Sync {
    fn on_collect_complete(&self, _event: &CollectCompleteEvent) {}
    fn on_file_hashed(&self, _event: &FileHashedEvent) {}
    fn on_file_error(&self, _event: &FileErrorEvent) {}
    fn on_baseline_written(&self, _event: &BaselineWrittenEvent) {}
    fn on_verify_complete(&self, _event: &VerifyCompleteEvent) {}
}

/// Handler that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl FimEventHandler for NoOpHandler {}
