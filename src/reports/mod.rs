//! Rendering a projected review panel for the CLI.
//!
//! `json` is meant for tooling; `summary` prints the panel as an indented
//! tree with status markers and score columns.

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{PanelReport, ReportConfig, ReportFormat};

use thiserror::Error;

/// A report could not be rendered.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// One output format.
pub trait ReportGenerator {
    fn generate_panel_report(
        &self,
        report: &PanelReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    fn format(&self) -> ReportFormat;
}

/// Reporter for `format` with default styling.
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Summary => Box::new(SummaryReporter::new()),
    }
}

/// Like [`create_reporter`], with ANSI colors turned off on request.
#[must_use]
pub fn create_reporter_with_options(format: ReportFormat, no_color: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary if no_color => Box::new(SummaryReporter::new().no_color()),
        other => create_reporter(other),
    }
}
