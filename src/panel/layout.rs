//! Read-only views of the panel for its two layouts.
//!
//! Views are rebuilt from the panel state on request and own all their data.

use crate::config::{PanelConfig, ReviewLayout};
use crate::projection::{ProjectedItem, ProjectedPart, ScoreSummary, StatusKind};
use indexmap::IndexSet;
use serde::Serialize;

/// Lifecycle phase of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPhase {
    /// Constructed, `start()` not called yet
    #[default]
    Uninitialized,
    /// Started, no data yet
    Rendered,
    /// Displaying a (possibly "all") filtered view of the data
    Filtered,
    Destroyed,
}

/// Snapshot of everything the panel displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub phase: PanelPhase,
    pub layout: ReviewLayout,
    pub disabled: bool,
    pub active_item_id: Option<String>,
    pub active_filter: Option<String>,
    pub filters: Vec<FilterButton>,
    pub header: Option<ScoreLine>,
    pub footer: Option<ScoreLine>,
    pub body: PanelBody,
}

impl PanelView {
    /// Number of items shown in the body.
    #[must_use]
    pub fn visible_item_count(&self) -> usize {
        match &self.body {
            PanelBody::Accordion(parts) => parts
                .iter()
                .flat_map(|part| part.sections.iter())
                .map(|section| section.items.len())
                .sum(),
            PanelBody::Fizzy(sections) => sections.iter().map(|s| s.buttons.len()).sum(),
        }
    }

    /// Number of sections shown in the body.
    #[must_use]
    pub fn visible_section_count(&self) -> usize {
        match &self.body {
            PanelBody::Accordion(parts) => parts.iter().map(|part| part.sections.len()).sum(),
            PanelBody::Fizzy(sections) => sections.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    pub id: String,
    pub label: String,
    pub active: bool,
}

/// A labelled score, used for the header, the footer and section totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreLine {
    pub label: String,
    pub score: f64,
    pub max_score: f64,
    pub percent: u32,
    /// `"score/max"`
    pub text: String,
}

impl ScoreLine {
    #[must_use]
    pub fn new(label: impl Into<String>, totals: ScoreSummary) -> Self {
        Self {
            label: label.into(),
            score: totals.score,
            max_score: totals.max_score,
            percent: totals.percent(),
            text: totals.ratio_text(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", content = "parts", rename_all = "lowercase")]
pub enum PanelBody {
    Accordion(Vec<AccordionPart>),
    Fizzy(Vec<FizzySection>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccordionPart {
    pub id: String,
    pub label: String,
    pub sections: Vec<AccordionSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionSection {
    pub id: String,
    pub label: String,
    pub expanded: bool,
    pub score: Option<ScoreLine>,
    pub items: Vec<NavItem>,
}

/// One entry of the accordion list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub position: Option<usize>,
    pub status: StatusKind,
    pub icon: Option<&'static str>,
    pub aria_label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FizzySection {
    pub id: String,
    /// Present only with `display_section_titles`
    pub title: Option<String>,
    pub buttons: Vec<FizzyButton>,
}

/// One numbered button of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FizzyButton {
    pub id: String,
    pub number: String,
    pub status: StatusKind,
    pub icon: Option<&'static str>,
    pub aria_label: String,
    pub active: bool,
    /// Present only with `display_item_tooltip`
    pub tooltip: Option<String>,
}

/// Inputs shared by both layout builders.
pub(crate) struct BodyContext<'a> {
    pub config: &'a PanelConfig,
    pub active_item: Option<&'a str>,
    pub expanded: &'a IndexSet<String>,
}

pub(crate) fn build_body(parts: &[ProjectedPart], ctx: &BodyContext<'_>) -> PanelBody {
    match ctx.config.layout {
        ReviewLayout::Default => PanelBody::Accordion(accordion(parts, ctx)),
        ReviewLayout::Fizzy => PanelBody::Fizzy(fizzy(parts, ctx)),
    }
}

fn accordion(parts: &[ProjectedPart], ctx: &BodyContext<'_>) -> Vec<AccordionPart> {
    parts
        .iter()
        .map(|part| AccordionPart {
            id: part.id.clone(),
            label: part.label.clone(),
            sections: part
                .sections
                .iter()
                .map(|section| AccordionSection {
                    id: section.id.clone(),
                    label: section.label.clone(),
                    expanded: ctx.expanded.contains(&section.id),
                    score: section
                        .totals
                        .map(|totals| ScoreLine::new(section.label.clone(), totals)),
                    items: section
                        .items
                        .iter()
                        .map(|item| NavItem {
                            id: item.id.clone(),
                            label: item.display_label.clone(),
                            position: item.position,
                            status: item.status,
                            icon: item.icon,
                            aria_label: item.aria_label.clone(),
                            active: is_active(item, ctx.active_item),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

fn fizzy(parts: &[ProjectedPart], ctx: &BodyContext<'_>) -> Vec<FizzySection> {
    let mut running = 0usize;
    parts
        .iter()
        .flat_map(|part| part.sections.iter())
        .map(|section| FizzySection {
            id: section.id.clone(),
            title: ctx
                .config
                .display_section_titles
                .then(|| section.label.clone()),
            buttons: section
                .items
                .iter()
                .map(|item| {
                    running += 1;
                    FizzyButton {
                        id: item.id.clone(),
                        number: item
                            .position
                            .map_or_else(|| running.to_string(), |p| (p + 1).to_string()),
                        status: item.status,
                        icon: item.icon,
                        aria_label: item.aria_label.clone(),
                        active: is_active(item, ctx.active_item),
                        tooltip: ctx.config.display_item_tooltip.then(|| item.label.clone()),
                    }
                })
                .collect(),
        })
        .collect()
}

fn is_active(item: &ProjectedItem, active: Option<&str>) -> bool {
    !item.id.is_empty() && active == Some(item.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, Part, Section, TestMap};
    use crate::projection::{project, ProjectOptions};

    fn parts(numbered: bool) -> Vec<ProjectedPart> {
        let map = TestMap::new(vec![Part::new(
            "p1",
            0,
            vec![
                Section::new(
                    "s1",
                    0,
                    vec![
                        Item::new("i1", 0)
                            .with_label("Question one")
                            .with_score(Some(1.0), 1.0),
                        Item::new("i2", 1).with_score(Some(0.0), 1.0),
                    ],
                )
                .with_label("Reading"),
                Section::new("s2", 1, vec![Item::new("i3", 2)]),
            ],
        )]);
        project(&map, ProjectOptions::default().numbered_labels(numbered)).parts
    }

    #[test]
    fn test_accordion_marks_active_and_expanded() {
        let config = PanelConfig::default();
        let expanded: IndexSet<String> = ["s1".to_string()].into_iter().collect();
        let ctx = BodyContext {
            config: &config,
            active_item: Some("i2"),
            expanded: &expanded,
        };
        let PanelBody::Accordion(parts) = build_body(&parts(false), &ctx) else {
            panic!("default layout is the accordion");
        };
        let sections = &parts[0].sections;
        assert!(sections[0].expanded);
        assert!(!sections[1].expanded);
        assert_eq!(sections[0].label, "Reading");
        assert_eq!(sections[0].score.as_ref().map(|s| s.text.as_str()), Some("1/2"));
        let active: Vec<_> = sections[0].items.iter().map(|i| i.active).collect();
        assert_eq!(active, [false, true]);
        assert_eq!(sections[0].items[0].label, "Question one");
    }

    #[test]
    fn test_fizzy_numbers_and_optional_titles() {
        let config = PanelConfig {
            layout: ReviewLayout::Fizzy,
            display_section_titles: false,
            display_item_tooltip: true,
            ..PanelConfig::default()
        };
        let expanded = IndexSet::new();
        let ctx = BodyContext {
            config: &config,
            active_item: Some("i3"),
            expanded: &expanded,
        };
        let PanelBody::Fizzy(sections) = build_body(&parts(true), &ctx) else {
            panic!("fizzy layout requested");
        };
        assert_eq!(sections.len(), 2);
        assert!(sections.iter().all(|s| s.title.is_none()));
        let numbers: Vec<_> = sections
            .iter()
            .flat_map(|s| s.buttons.iter())
            .map(|b| b.number.as_str())
            .collect();
        assert_eq!(numbers, ["1", "2", "3"]);
        assert_eq!(sections[0].buttons[0].tooltip.as_deref(), Some("Question one"));
        assert!(sections[1].buttons[0].active);
    }

    #[test]
    fn test_score_line() {
        let line = ScoreLine::new("TEST SCORE:", ScoreSummary::new(3.0, 6.0));
        assert_eq!(line.percent, 50);
        assert_eq!(line.text, "3/6");
    }
}
