//! End-to-end create/verify scenarios over real temp directories.
//!
//! Covers: unchanged, modified, deleted, added, empty baseline, idempotence,
//! content-only sensitivity, list-file targets, and fatal baseline errors.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use fim_core::config::FimConfig;
use fim_core::errors::{BaselineLoadError, FimError};
use fim_core::events::*;
use fim_engine::baseline::load_baseline;
use fim_engine::{
    create_baseline, fingerprint_bytes, verify_baseline, IntegrityStatus, Report, TargetSpec,
};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

// ---- Helpers ----

struct Fixture {
    _tmp: TempDir,
    root: PathBuf,
    watched: PathBuf,
    baseline: PathBuf,
}

/// `watched/` holds a.txt = "hello" and b.txt = "world"; the baseline file
/// lives outside the watched directory.
fn hello_world() -> Fixture {
    let tmp = TempDir::new().expect("create temp dir");
    let root = tmp.path().canonicalize().unwrap();
    let watched = root.join("watched");
    fs::create_dir_all(&watched).unwrap();
    fs::write(watched.join("a.txt"), "hello").unwrap();
    fs::write(watched.join("b.txt"), "world").unwrap();
    let baseline = root.join("baseline.json");
    Fixture {
        _tmp: tmp,
        root,
        watched,
        baseline,
    }
}

fn create(fx: &Fixture) {
    create_baseline(
        &TargetSpec::root(&fx.watched),
        &FimConfig::default(),
        &fx.baseline,
        &NoOpHandler,
    )
    .unwrap();
}

fn verify(fx: &Fixture) -> Report {
    verify_baseline(
        &fx.baseline,
        &TargetSpec::root(&fx.watched),
        &FimConfig::default(),
        &NoOpHandler,
    )
    .unwrap()
}

fn status_of(report: &Report, path: &Path) -> IntegrityStatus {
    report
        .entry(path)
        .unwrap_or_else(|| panic!("no entry for {}", path.display()))
        .status
}

#[derive(Default)]
struct RecordingHandler {
    collected: Mutex<Vec<CollectCompleteEvent>>,
    hashed: Mutex<Vec<FileHashedEvent>>,
    written: Mutex<Vec<BaselineWrittenEvent>>,
    verified: Mutex<Vec<VerifyCompleteEvent>>,
}

impl FimEventHandler for RecordingHandler {
    fn on_collect_complete(&self, event: &CollectCompleteEvent) {
        self.collected.lock().unwrap().push(event.clone());
    }
    fn on_file_hashed(&self, event: &FileHashedEvent) {
        self.hashed.lock().unwrap().push(event.clone());
    }
    fn on_baseline_written(&self, event: &BaselineWrittenEvent) {
        self.written.lock().unwrap().push(event.clone());
    }
    fn on_verify_complete(&self, event: &VerifyCompleteEvent) {
        self.verified.lock().unwrap().push(event.clone());
    }
}

/// Captures formatted log output for assertions.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// ---- Scenarios ----

#[test]
fn scenario_a_unchanged_tree_is_all_ok() {
    let fx = hello_world();
    create(&fx);

    let report = verify(&fx);
    assert_eq!(report.entries.len(), 2);
    assert!(report.entries.iter().all(|e| e.status == IntegrityStatus::Ok));
    assert!(report.is_clean());
}

#[test]
fn scenario_b_modified_content() {
    let fx = hello_world();
    create(&fx);
    fs::write(fx.watched.join("a.txt"), "HELLO").unwrap();

    let report = verify(&fx);
    let a = report.entry(&fx.watched.join("a.txt")).unwrap();
    assert_eq!(a.status, IntegrityStatus::Modified);
    assert_eq!(a.old_digest, Some(fingerprint_bytes(b"hello")));
    assert_eq!(a.new_digest, Some(fingerprint_bytes(b"HELLO")));
    assert_eq!(status_of(&report, &fx.watched.join("b.txt")), IntegrityStatus::Ok);
    assert!(!report.is_clean());
}

#[test]
fn scenario_c_deleted_file() {
    let fx = hello_world();
    create(&fx);
    fs::remove_file(fx.watched.join("b.txt")).unwrap();

    let report = verify(&fx);
    let b = report.entry(&fx.watched.join("b.txt")).unwrap();
    assert_eq!(b.status, IntegrityStatus::Deleted);
    assert_eq!(b.old_digest, Some(fingerprint_bytes(b"world")));
    assert!(b.new_digest.is_none());
    assert_eq!(status_of(&report, &fx.watched.join("a.txt")), IntegrityStatus::Ok);
}

#[test]
fn scenario_d_added_file() {
    let fx = hello_world();
    create(&fx);
    fs::write(fx.watched.join("c.txt"), "new").unwrap();

    let report = verify(&fx);
    let c = report.entry(&fx.watched.join("c.txt")).unwrap();
    assert_eq!(c.status, IntegrityStatus::Added);
    assert!(c.old_digest.is_none());
    assert_eq!(c.new_digest, Some(fingerprint_bytes(b"new")));
    assert_eq!(report.summary.ok, 2);
    assert_eq!(report.summary.added, 1);
}

#[test]
fn scenario_e_empty_baseline_reports_added() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    let watched = root.join("w");
    fs::create_dir_all(&watched).unwrap();
    fs::write(watched.join("only.txt"), "x").unwrap();
    let baseline = root.join("empty.json");
    fs::write(&baseline, "{}").unwrap();

    let report = verify_baseline(
        &baseline,
        &TargetSpec::root(&watched),
        &FimConfig::default(),
        &NoOpHandler,
    )
    .unwrap();
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].status, IntegrityStatus::Added);
    assert_eq!(report.entries[0].path, watched.join("only.txt"));
}

// ---- Properties on real trees ----

#[test]
fn verification_is_idempotent() {
    let fx = hello_world();
    create(&fx);
    fs::write(fx.watched.join("a.txt"), "changed").unwrap();
    fs::write(fx.watched.join("z.txt"), "new").unwrap();

    let first = verify(&fx);
    let second = verify(&fx);
    assert_eq!(first.entries, second.entries);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn mtime_change_alone_stays_ok() {
    let fx = hello_world();
    create(&fx);

    let a = fx.watched.join("a.txt");
    let file = fs::File::options().write(true).open(&a).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(3600))
        .unwrap();
    drop(file);

    let report = verify(&fx);
    assert_eq!(status_of(&report, &a), IntegrityStatus::Ok);
}

#[test]
fn created_baseline_is_sorted_json_of_absolute_paths() {
    let fx = hello_world();
    create(&fx);

    let doc = fs::read_to_string(&fx.baseline).unwrap();
    let value: serde_json::Value = serde_json::from_str(&doc).unwrap();
    let map = value.as_object().unwrap();
    assert_eq!(map.len(), 2);
    for (path, digest) in map {
        assert!(Path::new(path).is_absolute());
        assert_eq!(digest.as_str().unwrap().len(), 64);
    }
    let loaded = load_baseline(&fx.baseline).unwrap();
    assert_eq!(
        loaded.get(&fx.watched.join("a.txt")),
        Some(&fingerprint_bytes(b"hello"))
    );
}

#[test]
fn list_target_reports_deleted_listed_file() {
    let fx = hello_world();
    let list = fx.root.join("watch.list");
    fs::write(&list, "# monitored\nwatched/a.txt\nwatched/b.txt\n").unwrap();
    let target = TargetSpec::from_list_file(&list).unwrap();

    let outcome =
        create_baseline(&target, &FimConfig::default(), &fx.baseline, &NoOpHandler).unwrap();
    assert_eq!(outcome.baseline.len(), 2);
    assert!(outcome.missing.is_empty());

    fs::remove_file(fx.watched.join("a.txt")).unwrap();
    let report =
        verify_baseline(&fx.baseline, &target, &FimConfig::default(), &NoOpHandler).unwrap();
    assert_eq!(status_of(&report, &fx.watched.join("a.txt")), IntegrityStatus::Deleted);
    assert_eq!(status_of(&report, &fx.watched.join("b.txt")), IntegrityStatus::Ok);
}

#[test]
fn create_records_absent_listed_targets() {
    let fx = hello_world();
    let target = TargetSpec::list(
        vec![PathBuf::from("a.txt"), PathBuf::from("nope.txt")],
        Some(fx.watched.clone()),
    );
    let outcome =
        create_baseline(&target, &FimConfig::default(), &fx.baseline, &NoOpHandler).unwrap();
    assert_eq!(outcome.baseline.len(), 1);
    assert_eq!(outcome.missing, vec![fx.watched.join("nope.txt")]);
}

#[test]
fn verify_warns_about_absent_untracked_listed_target() {
    let fx = hello_world();
    let target = TargetSpec::list(vec![PathBuf::from("a.txt")], Some(fx.watched.clone()));
    create_baseline(&target, &FimConfig::default(), &fx.baseline, &NoOpHandler).unwrap();

    let target = TargetSpec::list(
        vec![PathBuf::from("a.txt"), PathBuf::from("ghost.txt")],
        Some(fx.watched.clone()),
    );
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let report = tracing::subscriber::with_default(subscriber, || {
        verify_baseline(&fx.baseline, &target, &FimConfig::default(), &NoOpHandler).unwrap()
    });

    assert!(report.is_clean());
    assert_eq!(report.entries.len(), 1);
    let output = logs.contents();
    assert!(output.contains("not tracked"), "{output}");
    assert!(output.contains("ghost.txt"), "{output}");
}

#[test]
fn excluded_files_are_not_tracked() {
    let fx = hello_world();
    fs::write(fx.watched.join("noise.log"), "x").unwrap();
    let config = FimConfig::from_toml("[scan]\nexclude = [\"*.log\"]\n").unwrap();

    let outcome = create_baseline(
        &TargetSpec::root(&fx.watched),
        &config,
        &fx.baseline,
        &NoOpHandler,
    )
    .unwrap();
    assert_eq!(outcome.baseline.len(), 2);
    assert!(!outcome.baseline.contains(&fx.watched.join("noise.log")));
}

// ---- Events ----

#[test]
fn events_fire_for_create_and_verify() {
    let fx = hello_world();
    let handler = RecordingHandler::default();
    create_baseline(
        &TargetSpec::root(&fx.watched),
        &FimConfig::default(),
        &fx.baseline,
        &handler,
    )
    .unwrap();
    assert_eq!(handler.collected.lock().unwrap()[0].files, 2);
    assert_eq!(handler.hashed.lock().unwrap().len(), 2);
    assert_eq!(handler.written.lock().unwrap()[0].entries, 2);

    fs::write(fx.watched.join("a.txt"), "HELLO").unwrap();
    verify_baseline(
        &fx.baseline,
        &TargetSpec::root(&fx.watched),
        &FimConfig::default(),
        &handler,
    )
    .unwrap();
    let verified = handler.verified.lock().unwrap();
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].ok, 1);
    assert_eq!(verified[0].modified, 1);
}

// ---- Fatal errors ----

#[test]
fn missing_baseline_aborts_verification() {
    let fx = hello_world();
    let err = verify_baseline(
        &fx.baseline,
        &TargetSpec::root(&fx.watched),
        &FimConfig::default(),
        &NoOpHandler,
    )
    .unwrap_err();
    assert!(matches!(err, FimError::BaselineLoad(BaselineLoadError::Read { .. })));
}

#[test]
fn corrupt_baseline_aborts_verification() {
    let fx = hello_world();
    fs::write(&fx.baseline, "not json").unwrap();
    let err = verify_baseline(
        &fx.baseline,
        &TargetSpec::root(&fx.watched),
        &FimConfig::default(),
        &NoOpHandler,
    )
    .unwrap_err();
    assert!(matches!(err, FimError::BaselineLoad(BaselineLoadError::Parse { .. })));
}

#[test]
fn unwritable_output_aborts_creation() {
    let fx = hello_world();
    let err = create_baseline(
        &TargetSpec::root(&fx.watched),
        &FimConfig::default(),
        &fx.root.join("missing-dir").join("b.json"),
        &NoOpHandler,
    )
    .unwrap_err();
    assert!(matches!(err, FimError::BaselinePersist(_)));
}
