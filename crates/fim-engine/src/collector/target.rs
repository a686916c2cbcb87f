//! What to monitor: one root, or an explicit list of paths.

use std::path::{Path, PathBuf};

use fim_core::errors::CollectionError;

/// The monitored target.
///
/// When `list` is empty, `root` is walked. Otherwise `root` is ignored and
/// each list entry is resolved (against `reference_dir` when relative) and
/// collected on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub root: PathBuf,
    pub list: Vec<PathBuf>,
    pub reference_dir: Option<PathBuf>,
}

impl TargetSpec {
    /// Walk a single directory (or hash a single file).
    pub fn root(path: impl Into<PathBuf>) -> Self {
        Self {
            root: path.into(),
            list: Vec::new(),
            reference_dir: None,
        }
    }

    /// Monitor explicit entries, resolving relative ones against `reference_dir`.
    pub fn list(entries: Vec<PathBuf>, reference_dir: Option<PathBuf>) -> Self {
        Self {
            root: PathBuf::from("."),
            list: entries,
            reference_dir,
        }
    }

    /// Read a list file: one path per line, relative entries resolved
    /// against the list file's own directory.
    pub fn from_list_file(path: &Path) -> Result<Self, CollectionError> {
        let content = std::fs::read_to_string(path).map_err(|source| CollectionError::ListFile {
            path: path.to_path_buf(),
            source,
        })?;
        let reference = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self::list(parse_list(&content), Some(reference)))
    }

    pub fn is_list(&self) -> bool {
        !self.list.is_empty()
    }
}

/// Blank lines and `#` comments are skipped; surrounding whitespace is trimmed.
pub fn parse_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}
