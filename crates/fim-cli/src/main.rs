//! `fim`: create a file integrity baseline, or verify a tree against one.

mod progress;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fim_core::config::{CliOverrides, FimConfig, ReportFormat};
use fim_core::constants::VERSION;
use fim_core::errors::{FimError, FimErrorCode};
use fim_core::tracing::{init_tracing, init_tracing_verbose};
use fim_engine::{create_baseline, verify_baseline, TargetSpec};

use crate::progress::ProgressHandler;

/// Verification found at least one entry that is not `OK`.
const EXIT_CHANGED: u8 = 1;
/// The run aborted.
const EXIT_FATAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "fim", version, about = "File integrity baseline and verification")]
struct Cli {
    #[arg(long, global = true, help = "Emit machine-readable JSON")]
    json: bool,
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Write the report to FILE instead of stdout"
    )]
    output: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Log at debug level")]
    verbose: bool,
    #[arg(long, global = true, value_name = "N", help = "Hashing threads, 0 for one per core")]
    threads: Option<usize>,
    #[arg(long, global = true, help = "Follow symbolic links while walking")]
    follow_symlinks: bool,
    #[arg(
        long,
        global = true,
        value_name = "GLOB",
        help = "Skip paths matching GLOB, relative to the walked directory (repeatable)"
    )]
    exclude: Vec<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fingerprint the target and write a new baseline.
    Create {
        /// Where to write the baseline document.
        baseline: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Compare the target against an existing baseline.
    Verify {
        /// Baseline document written by `create`.
        baseline: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args, Debug)]
struct TargetArgs {
    #[arg(
        long,
        value_name = "DIR",
        default_value = ".",
        conflicts_with = "list",
        help = "File or directory to monitor"
    )]
    path: PathBuf,
    #[arg(
        short = 'i',
        long = "input",
        value_name = "LIST",
        help = "File listing paths to monitor, one per line"
    )]
    list: Option<PathBuf>,
}

impl TargetArgs {
    fn resolve(&self) -> Result<TargetSpec> {
        match &self.list {
            Some(list) => Ok(TargetSpec::from_list_file(list).map_err(FimError::from)?),
            None => Ok(TargetSpec::root(&self.path)),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        init_tracing_verbose();
    } else {
        init_tracing();
    }

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<FimError>() {
                Some(fim) => eprintln!("error[{}]: {e:#}", fim.error_code()),
                None => eprintln!("error: {e:#}"),
            }
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let overrides = CliOverrides {
        threads: cli.threads,
        follow_symlinks: cli.follow_symlinks.then_some(true),
        exclude: cli.exclude.clone(),
        format: cli.json.then_some(ReportFormat::Json),
    };
    let config = FimConfig::load(&cwd, Some(&overrides)).map_err(FimError::from)?;
    tracing::debug!(version = VERSION, ?config, "configuration resolved");

    match &cli.command {
        Commands::Create { baseline, target } => {
            let target = target.resolve()?;
            let outcome = create_baseline(&target, &config, baseline, &ProgressHandler)?;
            let mut out = render::open_output(cli.output.as_deref())?;
            render::write_created(&mut *out, &outcome, config.report.effective_format())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { baseline, target } => {
            let target = target.resolve()?;
            let report = verify_baseline(baseline, &target, &config, &ProgressHandler)?;
            let mut out = render::open_output(cli.output.as_deref())?;
            render::write_report(&mut *out, &report, &config.report)?;
            if report.is_clean() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_CHANGED))
            }
        }
    }
}
