//! Configuration types for report generation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default.
//!
//! # Example
//!
//! ```
//! # use xmigraph::config::{AppConfig, ReportFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.report().format(), ReportFormat::Json);
//! assert_eq!(config.report().root_name(), "ROOT");
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report configuration section.
    #[serde(default)]
    report: ReportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(report: ReportConfig) -> Self {
        Self { report }
    }

    /// Returns the report configuration.
    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    /// Replace the configured report format.
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report.format = format;
        self
    }
}

/// Controls what the report contains and how it is rendered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format of the report.
    format: ReportFormat,

    /// Name given to the document root in the structure summary.
    root_name: String,

    /// Whether the meta-node listing is part of the report.
    include_meta: bool,
}

impl ReportConfig {
    /// Creates a new [`ReportConfig`].
    pub fn new(format: ReportFormat, root_name: impl Into<String>, include_meta: bool) -> Self {
        Self {
            format,
            root_name: root_name.into(),
            include_meta,
        }
    }

    /// Returns the [`ReportFormat`].
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Returns the name used for the document root.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Returns whether meta nodes are listed.
    pub fn include_meta(&self) -> bool {
        self.include_meta
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            root_name: "ROOT".to_owned(),
            include_meta: true,
        }
    }
}

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pretty-printed JSON summaries.
    #[default]
    Json,

    /// Indented text listing of the containment tree.
    Tree,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "tree" => Ok(Self::Tree),
            other => Err(format!(
                "unknown report format `{other}` (expected `json` or `tree`)"
            )),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Tree => write!(f, "tree"),
        }
    }
}
