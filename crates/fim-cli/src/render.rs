//! Report rendering: the plain text layout and the JSON document.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fim_core::config::{ReportConfig, ReportFormat};
use fim_engine::{BuildOutcome, DiffEntry, Report, ReportSummary};
use serde::Serialize;

pub const REPORT_HEADER: &str = "--- File Integrity Report ---";

/// Open the report destination: `path` when given, stdout otherwise.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create report file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ok: bool,
    summary: ReportSummary,
    entries: Vec<&'a DiffEntry>,
}

#[derive(Serialize)]
struct JsonCreated<'a> {
    baseline: &'a Path,
    entries: usize,
    omitted: &'a [PathBuf],
    missing: &'a [PathBuf],
}

/// Render a verification report in the configured format.
///
/// The summary always counts every entry; `show_unchanged = false` only
/// hides `OK` entries from the listing.
pub fn write_report<W: Write + ?Sized>(
    out: &mut W,
    report: &Report,
    config: &ReportConfig,
) -> Result<()> {
    let visible: Vec<&DiffEntry> = if config.effective_show_unchanged() {
        report.entries.iter().collect()
    } else {
        report.changes().collect()
    };

    match config.effective_format() {
        ReportFormat::Json => {
            let doc = JsonReport {
                ok: report.is_clean(),
                summary: report.summary,
                entries: visible,
            };
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
        ReportFormat::Text => {
            writeln!(out, "{REPORT_HEADER}")?;
            for entry in visible {
                write_entry(out, entry)?;
            }
            writeln!(out)?;
            writeln!(out, "{}", summary_line(&report.summary))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_entry<W: Write + ?Sized>(out: &mut W, entry: &DiffEntry) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Path: {}", entry.path.display())?;
    writeln!(out, "Status: {}", entry.status)?;
    if let Some(old) = &entry.old_digest {
        writeln!(out, "Old: {old}")?;
    }
    if let Some(new) = &entry.new_digest {
        writeln!(out, "New: {new}")?;
    }
    if !entry.message.is_empty() {
        writeln!(out, "Msg: {}", entry.message)?;
    }
    Ok(())
}

pub fn summary_line(summary: &ReportSummary) -> String {
    format!(
        "Summary: {} ok, {} modified, {} added, {} deleted, {} missing",
        summary.ok, summary.modified, summary.added, summary.deleted, summary.missing
    )
}

/// Render the result of `create`.
pub fn write_created<W: Write + ?Sized>(
    out: &mut W,
    outcome: &BuildOutcome,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Json => {
            let doc = JsonCreated {
                baseline: &outcome.output,
                entries: outcome.baseline.len(),
                omitted: &outcome.omitted,
                missing: &outcome.missing,
            };
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
        ReportFormat::Text => {
            writeln!(
                out,
                "Baseline created at {} ({} files)",
                outcome.output.display(),
                outcome.baseline.len()
            )?;
            for path in &outcome.omitted {
                writeln!(out, "Omitted (unreadable): {}", path.display())?;
            }
            for path in &outcome.missing {
                writeln!(out, "Not found: {}", path.display())?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
