//! Configuration system for fim.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod fim_config;
pub mod report_config;
pub mod scan_config;

pub use fim_config::{CliOverrides, FimConfig};
pub use report_config::{ReportConfig, ReportFormat};
pub use scan_config::ScanConfig;
