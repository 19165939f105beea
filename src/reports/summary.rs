//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable view of the panel for terminal usage.

use super::{PanelReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::panel::{PanelBody, ScoreLine};
use crate::projection::StatusKind;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn status_color(status: StatusKind) -> &'static str {
    match status {
        StatusKind::Correct => "green",
        StatusKind::Incorrect => "red",
        StatusKind::Partial | StatusKind::Pending => "yellow",
        StatusKind::Informational => "cyan",
        StatusKind::Skipped | StatusKind::Default | StatusKind::NoScore => "dim",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn score_line(&self, line: &ScoreLine) -> String {
        format!(
            "{} {}% ({})",
            self.color(&line.label, "bold"),
            line.percent,
            line.text
        )
    }

    fn status(&self, status: StatusKind) -> String {
        if status == StatusKind::Default {
            return String::new();
        }
        self.color(status.label(), status_color(status))
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_panel_report(
        &self,
        report: &PanelReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let view = &report.panel;
        let mut lines = Vec::new();

        lines.push(self.color(
            report.title.as_deref().unwrap_or("Test Review"),
            "bold",
        ));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{}  {} items, {} layout{}",
            self.color("Map:", "cyan"),
            report.item_count,
            view.layout,
            if view.disabled { ", navigation disabled" } else { "" }
        ));
        if let Some(header) = &view.header {
            lines.push(self.score_line(header));
        }
        if !view.filters.is_empty() {
            let buttons: Vec<String> = view
                .filters
                .iter()
                .map(|f| {
                    if f.active {
                        self.color(&format!("[{}]", f.label), "bold")
                    } else {
                        f.label.clone()
                    }
                })
                .collect();
            lines.push(format!("{}  {}", self.color("Filters:", "cyan"), buttons.join("  ")));
        }
        lines.push(String::new());

        match &view.body {
            PanelBody::Accordion(parts) => {
                for part in parts {
                    lines.push(self.color(&part.label, "bold"));
                    for section in &part.sections {
                        let marker = if section.expanded { "-" } else { "+" };
                        let score = section
                            .score
                            .as_ref()
                            .map(|s| format!(" ({})", s.text))
                            .unwrap_or_default();
                        lines.push(format!("  {marker} {}{score}", section.label));
                        if !section.expanded {
                            continue;
                        }
                        for item in &section.items {
                            let cursor = if item.active { ">" } else { " " };
                            lines.push(format!(
                                "    {cursor} {:<24} {}",
                                item.label,
                                self.status(item.status)
                            ));
                        }
                    }
                }
            }
            PanelBody::Fizzy(sections) => {
                for section in sections {
                    if let Some(title) = &section.title {
                        lines.push(self.color(title, "bold"));
                    }
                    let buttons: Vec<String> = section
                        .buttons
                        .iter()
                        .map(|b| {
                            let text = if b.active {
                                format!("[{}]", b.number)
                            } else {
                                format!(" {} ", b.number)
                            };
                            self.color(&text, status_color(b.status))
                        })
                        .collect();
                    lines.push(format!("  {}", buttons.join(" ")));
                }
            }
        }

        if view.visible_section_count() == 0 {
            lines.push(format!("  {}", self.color("No items to display", "dim")));
        }

        if let Some(footer) = &view.footer {
            lines.push(String::new());
            lines.push(format!("{} {}", self.color(&footer.label, "bold"), footer.text));
        }

        if !config.hide_warnings && !report.warnings.is_empty() {
            lines.push(String::new());
            lines.push(self.color(&format!("Warnings ({}):", report.warnings.len()), "yellow"));
            for warning in &report.warnings {
                lines.push(format!("  - {warning}"));
            }
        }

        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PanelConfig, ReviewLayout};
    use crate::model::{collect_warnings, Item, Part, Section, TestMap};
    use crate::panel::ReviewPanel;

    fn map() -> TestMap {
        TestMap::new(vec![Part::new(
            "p1",
            0,
            vec![Section::new(
                "s1",
                0,
                vec![
                    Item::new("i1", 0).with_score(Some(2.0), 2.0),
                    Item::new("i2", 1).with_score(Some(0.0), 2.0),
                ],
            )],
        )])
    }

    fn report(config: PanelConfig, map: &TestMap) -> PanelReport {
        let mut panel = ReviewPanel::new(config);
        panel.start();
        panel.set_data(map);
        PanelReport {
            title: None,
            item_count: map.item_count(),
            panel: panel.view(),
            warnings: collect_warnings(map),
        }
    }

    #[test]
    fn test_accordion_summary() {
        let text = SummaryReporter::new()
            .no_color()
            .generate_panel_report(&report(PanelConfig::default(), &map()), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("TEST SCORE: 50% (2/4)"));
        assert!(text.contains("[All]"));
        assert!(text.contains("  - s1 (2/4)"));
        assert!(text.contains("> i1"));
        assert!(text.contains("Incorrect"));
        assert!(text.contains("TOTAL 2/4"));
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn test_fizzy_summary() {
        let config = PanelConfig {
            layout: ReviewLayout::Fizzy,
            ..PanelConfig::default()
        };
        let text = SummaryReporter::new()
            .no_color()
            .generate_panel_report(&report(config, &map()), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("[1]  2 "));
    }

    #[test]
    fn test_empty_map_summary() {
        let text = SummaryReporter::new()
            .no_color()
            .generate_panel_report(
                &report(PanelConfig::default(), &TestMap::default()),
                &ReportConfig::default(),
            )
            .unwrap();
        assert!(text.contains("TEST SCORE: 0% (0/0)"));
        assert!(text.contains("No items to display"));
    }
}
