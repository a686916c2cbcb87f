//! Verification data types: IntegrityStatus, DiffEntry, Report.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::baseline::Digest;
use crate::stats::RunStats;

/// Classification of one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrityStatus {
    /// Content matches the baseline.
    Ok,
    /// Content differs from the baseline.
    Modified,
    /// Present now, absent from the baseline.
    Added,
    /// In the baseline, gone or unreadable now.
    Deleted,
    /// Listed for monitoring, unreadable, and never tracked.
    Missing,
}

impl IntegrityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Modified => "MODIFIED",
            Self::Added => "ADDED",
            Self::Deleted => "DELETED",
            Self::Missing => "MISSING",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for IntegrityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One verification finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    pub status: IntegrityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_digest: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_digest: Option<Digest>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Non-UTF-8 bytes are written as U+FFFD; such paths are never in a
/// baseline, so the lossy form only ever labels ADDED or MISSING findings.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Count of entries per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub ok: usize,
    pub modified: usize,
    pub added: usize,
    pub deleted: usize,
    pub missing: usize,
}

impl ReportSummary {
    pub fn from_entries(entries: &[DiffEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry.status {
                IntegrityStatus::Ok => summary.ok += 1,
                IntegrityStatus::Modified => summary.modified += 1,
                IntegrityStatus::Added => summary.added += 1,
                IntegrityStatus::Deleted => summary.deleted += 1,
                IntegrityStatus::Missing => summary.missing += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.ok + self.modified + self.added + self.deleted + self.missing
    }

    pub fn changed(&self) -> usize {
        self.total() - self.ok
    }
}

/// Result of a verification: entries sorted by path, one per path.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub entries: Vec<DiffEntry>,
    pub summary: ReportSummary,
    #[serde(skip)]
    pub stats: RunStats,
}

impl Report {
    pub fn new(entries: Vec<DiffEntry>, stats: RunStats) -> Self {
        let summary = ReportSummary::from_entries(&entries);
        Self {
            entries,
            summary,
            stats,
        }
    }

    /// True when every entry is `OK`.
    pub fn is_clean(&self) -> bool {
        self.summary.changed() == 0
    }

    pub fn entry(&self, path: &Path) -> Option<&DiffEntry> {
        self.entries
            .binary_search_by(|e| e.path.as_path().cmp(path))
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn changes(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter().filter(|e| !e.status.is_ok())
    }
}
