//! Top-level fim configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ReportConfig, ReportFormat, ScanConfig};
use crate::constants::{MAX_THREADS, PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration, built once at process entry and passed by
/// reference into the collector, builder and comparator.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FIM_*`)
/// 3. Project config (`fim.toml` in the working root)
/// 4. User config (`~/.fim/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FimConfig {
    pub scan: ScanConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threads: Option<usize>,
    pub follow_symlinks: Option<bool>,
    pub exclude: Vec<String>,
    pub format: Option<ReportFormat>,
}

impl FimConfig {
    /// Load configuration with the user config taken from `~/.fim/config.toml`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let user = user_config_path();
        Self::load_from(user.as_deref(), root, cli_overrides)
    }

    /// Load configuration with an explicit user config location.
    pub fn load_from(
        user_config: Option<&Path>,
        root: &Path,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(path) = user_config {
            if path.exists() {
                match Self::merge_toml_file(&mut config, path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        // An unreadable user config is not fatal.
                        ::tracing::warn!(error = %e, "ignoring user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project = root.join(PROJECT_CONFIG_FILE);
        if project.exists() {
            Self::merge_toml_file(&mut config, &project)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    pub fn validate(config: &FimConfig) -> Result<(), ConfigError> {
        if let Some(threads) = config.scan.threads {
            if threads > MAX_THREADS {
                return Err(ConfigError::InvalidValue {
                    field: "scan.threads".to_string(),
                    message: format!("must be at most {MAX_THREADS}"),
                });
            }
        }
        if let Some(pattern) = config.scan.exclude.iter().find(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "scan.exclude".to_string(),
                message: format!("empty pattern {pattern:?}"),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut FimConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let file_config: FimConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        ::tracing::debug!(path = %path.display(), "merged config file");
        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it is set.
    fn merge(base: &mut FimConfig, other: &FimConfig) {
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if !other.scan.exclude.is_empty() {
            base.scan.exclude = other.scan.exclude.clone();
        }
        if other.report.format.is_some() {
            base.report.format = other.report.format;
        }
        if other.report.show_unchanged.is_some() {
            base.report.show_unchanged = other.report.show_unchanged;
        }
    }

    /// Pattern: `FIM_SCAN_THREADS`, `FIM_REPORT_FORMAT`, etc.
    /// Unparsable values are skipped with a warning.
    fn apply_env_overrides(config: &mut FimConfig) {
        if let Some(v) = env_parsed::<usize>("FIM_SCAN_THREADS") {
            config.scan.threads = Some(v);
        }
        if let Some(v) = env_parsed::<bool>("FIM_SCAN_FOLLOW_SYMLINKS") {
            config.scan.follow_symlinks = Some(v);
        }
        if let Some(v) = env_parsed::<ReportFormat>("FIM_REPORT_FORMAT") {
            config.report.format = Some(v);
        }
        if let Some(v) = env_parsed::<bool>("FIM_REPORT_SHOW_UNCHANGED") {
            config.report.show_unchanged = Some(v);
        }
    }

    fn apply_cli_overrides(config: &mut FimConfig, cli: &CliOverrides) {
        if let Some(v) = cli.threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.follow_symlinks {
            config.scan.follow_symlinks = Some(v);
        }
        if !cli.exclude.is_empty() {
            config.scan.exclude.extend(cli.exclude.iter().cloned());
        }
        if let Some(v) = cli.format {
            config.report.format = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            ::tracing::warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

/// `~/.fim/config.toml`, if a home directory is known.
fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|h| PathBuf::from(h).join(USER_CONFIG_DIR).join("config.toml"))
}
