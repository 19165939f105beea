//! Project command handler.
//!
//! Implements the `project` subcommand: load a test map, drive a review panel
//! over it and print the resulting view.

use super::output::{should_use_color, write_output, OutputTarget};
use crate::config::ReviewConfig;
use crate::model::{load_test_map, TestMap};
use crate::panel::ReviewPanel;
use crate::reports::{create_reporter_with_options, PanelReport, ReportConfig, ReportFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Settings of one `project` run.
#[derive(Debug, Clone)]
pub struct ProjectCommand {
    pub map_path: PathBuf,
    pub review: ReviewConfig,
    /// Filter to activate after loading
    pub filter: Option<String>,
    /// Item to make active after loading
    pub active: Option<String>,
    /// Expand every accordion section
    pub expand_all: bool,
    pub output: ReportFormat,
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
    pub hide_warnings: bool,
    pub quiet: bool,
}

/// Build the panel report for a map.
pub fn build_panel_report(map: &TestMap, command: &ProjectCommand) -> Result<PanelReport> {
    let mut panel = ReviewPanel::new(command.review.panel.clone());
    panel.start();
    panel.set_data(map);

    if let Some(filter) = &command.filter {
        panel
            .set_active_filter(filter)
            .with_context(|| format!("cannot apply filter '{filter}'"))?;
    }
    if let Some(item) = &command.active {
        if !panel.set_active_item(item) && panel.active_item() != Some(item.as_str()) {
            tracing::warn!(item = %item, "Requested active item not found in the test map");
        }
    }
    if command.expand_all {
        panel.expand_all();
    }

    Ok(PanelReport {
        title: map.title.clone(),
        item_count: map.item_count(),
        panel: panel.view(),
        warnings: panel.projection().warnings.clone(),
    })
}

/// Run the project command
pub fn run_project(command: ProjectCommand) -> Result<()> {
    let map = load_test_map(&command.map_path)
        .with_context(|| format!("failed to load {}", command.map_path.display()))?;
    tracing::debug!(items = map.item_count(), "Loaded test map");

    let report = build_panel_report(&map, &command)?;
    let target = OutputTarget::from_option(command.output_file.clone());
    let no_color = !should_use_color(command.no_color, &target);
    let reporter = create_reporter_with_options(command.output, no_color);
    let config = ReportConfig {
        hide_warnings: command.hide_warnings,
    };
    let mut text = reporter.generate_panel_report(&report, &config)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    write_output(&text, &target, command.quiet)
}
