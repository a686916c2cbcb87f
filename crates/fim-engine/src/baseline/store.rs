//! Baseline persistence as a pretty-printed JSON object.
//!
//! The document maps absolute path strings to lowercase hex digests and
//! carries nothing else, so it diffs cleanly between runs.

use std::collections::BTreeMap;
use std::path::Path;

use fim_core::errors::{BaselineLoadError, BaselinePersistError};

use super::types::{Baseline, Digest};
use crate::collector::normalize_lexically;

/// Serialize a baseline to the on-disk document (keys sorted, trailing newline).
pub fn to_document(baseline: &Baseline) -> Result<String, serde_json::Error> {
    let mut doc = serde_json::to_string_pretty(baseline.entries())?;
    doc.push('\n');
    Ok(doc)
}

/// Parse the on-disk document. `origin` only labels errors.
///
/// Keys are normalized the way the collector spells paths (`/w/./a.txt`
/// becomes `/w/a.txt`), so an edited document still matches collected
/// files exactly once. Keys without a root are rejected.
pub fn from_document(doc: &str, origin: &Path) -> Result<Baseline, BaselineLoadError> {
    let raw: BTreeMap<String, String> =
        serde_json::from_str(doc).map_err(|source| BaselineLoadError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

    let mut entries = BTreeMap::new();
    for (entry, digest) in raw {
        let Some(parsed) = Digest::from_hex(&digest) else {
            return Err(BaselineLoadError::InvalidDigest {
                path: origin.to_path_buf(),
                entry,
                digest,
            });
        };
        if !Path::new(&entry).has_root() {
            return Err(BaselineLoadError::RelativeEntry {
                path: origin.to_path_buf(),
                entry,
            });
        }
        let key = normalize_lexically(Path::new(&entry))
            .to_string_lossy()
            .into_owned();
        if key != entry {
            tracing::debug!(entry = %entry, normalized = %key, "normalized baseline key");
        }
        if let Some(previous) = entries.insert(key, parsed) {
            tracing::warn!(
                entry = %entry,
                replaced = %previous,
                "baseline lists the same file twice, keeping the later spelling"
            );
        }
    }
    Ok(Baseline::from_entries(entries))
}

/// Write `baseline` to `path`, replacing any existing file.
pub fn persist_baseline(baseline: &Baseline, path: &Path) -> Result<(), BaselinePersistError> {
    let doc = to_document(baseline)?;
    std::fs::write(path, doc).map_err(|source| BaselinePersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), entries = baseline.len(), "baseline written");
    Ok(())
}

/// Read and validate the baseline at `path`.
pub fn load_baseline(path: &Path) -> Result<Baseline, BaselineLoadError> {
    let doc = std::fs::read_to_string(path).map_err(|source| BaselineLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let baseline = from_document(&doc, path)?;
    tracing::debug!(path = %path.display(), entries = baseline.len(), "baseline loaded");
    Ok(baseline)
}
