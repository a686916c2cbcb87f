//! Report rendering configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output format of a verification report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format {other:?} (expected text or json)")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Default: text.
    pub format: Option<ReportFormat>,
    /// Render `OK` entries. Default: true.
    pub show_unchanged: Option<bool>,
}

impl ReportConfig {
    pub fn effective_format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }

    pub fn effective_show_unchanged(&self) -> bool {
        self.show_unchanged.unwrap_or(true)
    }
}
