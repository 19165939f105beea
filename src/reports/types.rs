//! Report type definitions.

use crate::model::MapWarning;
use crate::panel::PanelView;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Brief human-readable summary
    #[default]
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Everything a panel report shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelReport {
    pub title: Option<String>,
    pub item_count: usize,
    pub panel: PanelView,
    pub warnings: Vec<MapWarning>,
}

/// Report generation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportConfig {
    /// Omit the map warnings section
    pub hide_warnings: bool,
}
