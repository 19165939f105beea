//! JSON report generator.

use super::{PanelReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_panel_report(
        &self,
        report: &PanelReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut value = serde_json::to_value(report)
            .map_err(|e| ReportError::SerializationError(e.to_string()))?;
        if config.hide_warnings {
            if let Some(object) = value.as_object_mut() {
                object.remove("warnings");
            }
        }
        let text = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        text.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
