//! Validate command handler.
//!
//! Implements the `validate` subcommand: report malformed test-map nodes and
//! invalid review settings without rendering anything.

use super::output::{write_output, OutputTarget};
use crate::config::{ConfigError, ReviewConfig, Validatable};
use crate::model::{collect_warnings, load_test_map, MapWarning};
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Findings of one validation run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub item_count: usize,
    pub warnings: Vec<MapWarning>,
    #[serde(serialize_with = "serialize_config_errors")]
    pub config_errors: Vec<ConfigError>,
}

fn serialize_config_errors<S: serde::Serializer>(
    errors: &[ConfigError],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

impl ValidationOutcome {
    /// Exit code: 1 for invalid settings, 2 for map warnings when they fail the run.
    #[must_use]
    pub fn exit_code(&self, fail_on_warning: bool) -> i32 {
        if !self.config_errors.is_empty() {
            1
        } else if fail_on_warning && !self.warnings.is_empty() {
            2
        } else {
            0
        }
    }

    fn to_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Items: {}", self.item_count);
        if self.config_errors.is_empty() {
            let _ = writeln!(out, "Configuration: ok");
        } else {
            let _ = writeln!(out, "Configuration errors ({}):", self.config_errors.len());
            for error in &self.config_errors {
                let _ = writeln!(out, "  - {error}");
            }
        }
        if self.warnings.is_empty() {
            let _ = writeln!(out, "Test map: ok");
        } else {
            let _ = writeln!(out, "Test map warnings ({}):", self.warnings.len());
            for warning in &self.warnings {
                let _ = writeln!(out, "  - {warning}");
            }
        }
        out
    }
}

/// Validate a map file and the effective configuration.
pub fn validate_map(map_path: &std::path::Path, config: &ReviewConfig) -> Result<ValidationOutcome> {
    let map = load_test_map(map_path)
        .with_context(|| format!("failed to load {}", map_path.display()))?;
    Ok(ValidationOutcome {
        item_count: map.item_count(),
        warnings: collect_warnings(&map),
        config_errors: config.validate(),
    })
}

/// Run the validate command, returning the process exit code
#[allow(clippy::needless_pass_by_value)]
pub fn run_validate(
    map_path: PathBuf,
    config: &ReviewConfig,
    output: ReportFormat,
    output_file: Option<PathBuf>,
    fail_on_warning: bool,
    quiet: bool,
) -> Result<i32> {
    let outcome = validate_map(&map_path, config)?;
    let text = match output {
        ReportFormat::Json => serde_json::to_string_pretty(&outcome)? + "\n",
        ReportFormat::Summary => outcome.to_summary(),
    };
    write_output(&text, &OutputTarget::from_option(output_file), quiet)?;
    Ok(outcome.exit_code(fail_on_warning))
}
