//! Recursive collection of regular files.

use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

use fim_core::config::ScanConfig;
use fim_core::errors::CollectionError;
use fim_core::types::FxHashSet;
use walkdir::WalkDir;

use super::exclude::ExcludePatterns;
use super::target::TargetSpec;

/// Result of path collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedPaths {
    /// Absolute paths of regular files, sorted and unique.
    pub files: Vec<PathBuf>,
    /// Targets that did not exist when collection ran, sorted and unique.
    pub missing: Vec<PathBuf>,
}

impl CollectedPaths {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Resolve `target` into absolute file paths.
///
/// Targets that do not exist are skipped and listed in `missing`, so a
/// deleted file can still be classified by verification later. Fails on
/// directories that cannot be walked and on symlink loops.
pub fn collect(target: &TargetSpec, scan: &ScanConfig) -> Result<CollectedPaths, CollectionError> {
    let excludes = ExcludePatterns::new(&scan.exclude)?;
    let mut collector = Collector {
        excludes,
        follow_symlinks: scan.effective_follow_symlinks(),
        seen: FxHashSet::default(),
        files: Vec::new(),
        missing: Vec::new(),
    };

    if target.is_list() {
        for entry in &target.list {
            let resolved = match &target.reference_dir {
                Some(base) if entry.is_relative() => base.join(entry),
                _ => entry.clone(),
            };
            collector.add(&resolved)?;
        }
    } else {
        collector.add(&target.root)?;
    }

    let Collector {
        mut files,
        mut missing,
        ..
    } = collector;
    files.sort();
    missing.sort();
    missing.dedup();
    Ok(CollectedPaths { files, missing })
}

struct Collector {
    excludes: ExcludePatterns,
    follow_symlinks: bool,
    seen: FxHashSet<PathBuf>,
    files: Vec<PathBuf>,
    missing: Vec<PathBuf>,
}

impl Collector {
    fn add(&mut self, path: &Path) -> Result<(), CollectionError> {
        let abs = absolutize(path).map_err(|source| CollectionError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;

        let meta = match std::fs::metadata(&abs) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %abs.display(), "target missing, skipped");
                self.missing.push(abs);
                return Ok(());
            }
            Err(source) => return Err(CollectionError::Resolve { path: abs, source }),
        };

        if meta.is_dir() {
            self.walk(&abs)
        } else {
            if meta.is_file() {
                self.push(abs);
            } else {
                tracing::debug!(path = %abs.display(), "not a regular file, skipped");
            }
            Ok(())
        }
    }

    fn walk(&mut self, dir: &Path) -> Result<(), CollectionError> {
        let excludes = &self.excludes;
        let walker = WalkDir::new(dir)
            .follow_links(self.follow_symlinks)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !excludes.is_excluded(entry.path().strip_prefix(dir).unwrap_or(entry.path()))
            });

        let mut found = Vec::new();
        for item in walker {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    if let Some(ancestor) = err.loop_ancestor() {
                        return Err(CollectionError::SymlinkLoop {
                            path: err.path().map(Path::to_path_buf).unwrap_or_default(),
                            ancestor: ancestor.to_path_buf(),
                        });
                    }
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.to_path_buf());
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory walk failed"));
                    if source.kind() == ErrorKind::NotFound {
                        // Vanished mid-walk, or a dangling link while following links.
                        tracing::debug!(path = %path.display(), "entry vanished during walk");
                        continue;
                    }
                    return Err(CollectionError::Walk { path, source });
                }
            };

            if entry.file_type().is_file() {
                found.push(entry.into_path());
            } else if entry.path_is_symlink() && !self.follow_symlinks {
                tracing::debug!(path = %entry.path().display(), "symlink not followed");
            }
        }

        for path in found {
            self.push(path);
        }
        Ok(())
    }

    fn push(&mut self, path: PathBuf) {
        if self.seen.insert(path.clone()) {
            self.files.push(path);
        }
    }
}

/// Make `path` absolute and drop `.`/`..` components lexically, so the same
/// file reached through different spellings dedups to one key.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    Ok(normalize_lexically(&std::path::absolute(path)?))
}

/// Drop `.` components, resolve `..` against the preceding component and
/// collapse repeated or trailing separators. Symlinks are not consulted.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    fn canonical_root() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, root)
    }

    #[test]
    fn walks_root_recursively() {
        let (_dir, root) = canonical_root();
        let a = write(&root, "a.txt", "a");
        let b = write(&root, "sub/deeper/b.txt", "b");

        let collected = collect(&TargetSpec::root(&root), &ScanConfig::default()).unwrap();
        assert_eq!(collected.files, vec![a, b]);
        assert!(collected.missing.is_empty());
    }

    #[test]
    fn single_file_root() {
        let (_dir, root) = canonical_root();
        let a = write(&root, "a.txt", "a");
        let collected = collect(&TargetSpec::root(&a), &ScanConfig::default()).unwrap();
        assert_eq!(collected.files, vec![a]);
    }

    #[test]
    fn list_entries_resolve_against_reference_dir_and_dedup() {
        let (_dir, root) = canonical_root();
        let a = write(&root, "a.txt", "a");
        let b = write(&root, "sub/b.txt", "b");

        let spec = TargetSpec::list(
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("sub"),
                PathBuf::from("./sub/../a.txt"),
                b.clone(),
            ],
            Some(root.clone()),
        );
        let collected = collect(&spec, &ScanConfig::default()).unwrap();
        assert_eq!(collected.files, vec![a, b]);
    }

    #[test]
    fn missing_list_entry_is_skipped_not_fatal() {
        let (_dir, root) = canonical_root();
        let a = write(&root, "a.txt", "a");
        let spec = TargetSpec::list(
            vec![PathBuf::from("a.txt"), PathBuf::from("gone.txt")],
            Some(root.clone()),
        );
        let collected = collect(&spec, &ScanConfig::default()).unwrap();
        assert_eq!(collected.files, vec![a]);
        assert_eq!(collected.missing, vec![root.join("gone.txt")]);
    }

    #[test]
    fn exclude_patterns_prune_walk() {
        let (_dir, root) = canonical_root();
        let keep = write(&root, "keep.txt", "k");
        write(&root, "debug.log", "x");
        write(&root, "cache/blob", "x");

        let scan = ScanConfig {
            exclude: vec!["*.log".into(), "cache".into()],
            ..Default::default()
        };
        let collected = collect(&TargetSpec::root(&root), &scan).unwrap();
        assert_eq!(collected.files, vec![keep]);
    }

    #[test]
    fn absolutize_drops_dot_components() {
        let p = absolutize(Path::new("/x/./y/../z")).unwrap();
        assert_eq!(p, PathBuf::from("/x/z"));
    }

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_lexically(Path::new("/w//a/./b/")), PathBuf::from("/w/a/b"));
        assert_eq!(normalize_lexically(Path::new("/w/a/../../x")), PathBuf::from("/x"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_aborts_collection() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, root) = canonical_root();
        write(&root, "a.txt", "a");
        let locked = root.join("locked");
        write(&root, "locked/secret.txt", "s");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users read through mode bits.
        if std::fs::read_dir(&locked).is_ok() {
            std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = collect(&TargetSpec::root(&root), &ScanConfig::default());
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(CollectionError::Walk { path, source }) => {
                assert_eq!(path, locked);
                assert_eq!(source.kind(), ErrorKind::PermissionDenied);
            }
            other => panic!("expected walk error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_collected_by_default() {
        let (_dir, root) = canonical_root();
        let a = write(&root, "a.txt", "a");
        std::os::unix::fs::symlink(&a, root.join("link.txt")).unwrap();

        let collected = collect(&TargetSpec::root(&root), &ScanConfig::default()).unwrap();
        assert_eq!(collected.files, vec![a]);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_is_fatal_when_following() {
        let (_dir, root) = canonical_root();
        write(&root, "sub/a.txt", "a");
        std::os::unix::fs::symlink(&root, root.join("sub/back")).unwrap();

        let scan = ScanConfig {
            follow_symlinks: Some(true),
            ..Default::default()
        };
        let err = collect(&TargetSpec::root(&root), &scan).unwrap_err();
        assert!(matches!(err, CollectionError::SymlinkLoop { .. }), "got {err}");
    }
}
