//! Test map → display-ready projection.
//!
//! [`project`] is a pure function: it never mutates the input map and every
//! call builds a fresh [`ProjectedRoot`]. Callers that need a different view
//! re-project or filter a clone; nothing is patched in place.

use super::score::ScoreSummary;
use super::status::{classify, StatusKind};
use crate::model::{collect_warnings, Item, MapWarning, Part, Section, TestMap};
use indexmap::IndexMap;
use serde::Serialize;

/// Options controlling a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectOptions {
    /// Classify with scores and compute aggregate totals
    pub with_score: bool,
    /// Whether the correct response may be shown to the reviewer
    pub show_correct: bool,
    /// Label items by their 1-based test position instead of their title
    pub numbered_labels: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            with_score: true,
            show_correct: true,
            numbered_labels: false,
        }
    }
}

impl ProjectOptions {
    #[must_use]
    pub const fn with_score(mut self, with_score: bool) -> Self {
        self.with_score = with_score;
        self
    }

    #[must_use]
    pub const fn show_correct(mut self, show_correct: bool) -> Self {
        self.show_correct = show_correct;
        self
    }

    #[must_use]
    pub const fn numbered_labels(mut self, numbered: bool) -> Self {
        self.numbered_labels = numbered;
        self
    }
}

/// A projected leaf item. `status` is derived and never stored on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedItem {
    /// Empty when the source item had no id
    pub id: String,
    pub label: String,
    pub position: Option<usize>,
    pub status: StatusKind,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    pub display_label: String,
    pub icon: Option<&'static str>,
    pub aria_label: String,
    pub has_correct_response_tab: bool,
    /// `has_correct_response_tab` gated by the `show_correct` option
    pub correct_response_shown: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedSection {
    pub id: String,
    pub label: String,
    pub position: Option<usize>,
    pub totals: Option<ScoreSummary>,
    pub items: Vec<ProjectedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPart {
    pub id: String,
    pub label: String,
    pub position: Option<usize>,
    pub totals: Option<ScoreSummary>,
    pub sections: Vec<ProjectedSection>,
}

/// Result of projecting a whole test map.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedRoot {
    pub parts: Vec<ProjectedPart>,
    /// Every addressable item keyed by id, in display order
    pub items: IndexMap<String, ProjectedItem>,
    /// Test totals; `None` when projected without scores
    pub totals: Option<ScoreSummary>,
    pub warnings: Vec<MapWarning>,
}

impl ProjectedRoot {
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&ProjectedItem> {
        self.items.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// First addressable item of the first non-empty section, in position order.
    #[must_use]
    pub fn first_item(&self) -> Option<&ProjectedItem> {
        first_item_in(&self.parts, |id| self.items.contains_key(id))
    }

    /// The section holding an item.
    #[must_use]
    pub fn section_of(&self, item_id: &str) -> Option<&ProjectedSection> {
        self.parts
            .iter()
            .flat_map(|part| part.sections.iter())
            .find(|section| section.items.iter().any(|item| item.id == item_id))
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.parts.iter().map(|part| part.sections.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn first_item_in<'a>(
    parts: &'a [ProjectedPart],
    addressable: impl Fn(&str) -> bool,
) -> Option<&'a ProjectedItem> {
    parts
        .iter()
        .flat_map(|part| part.sections.iter())
        .flat_map(|section| section.items.iter())
        .find(|item| addressable(&item.id))
}

/// Project a test map.
///
/// Parts, sections and items come out sorted by ascending `position`
/// (document order for nodes missing one). With `with_score`, section and
/// part totals are summed bottom-up; test totals use the map's own
/// `score` / `max_score` when supplied and the bottom-up sum otherwise.
#[must_use]
pub fn project(map: &TestMap, options: ProjectOptions) -> ProjectedRoot {
    let warnings = collect_warnings(map);

    let parts: Vec<ProjectedPart> = sorted(&map.parts, |p| p.position)
        .into_iter()
        .map(|part| project_part(part, options))
        .collect();

    let mut items = IndexMap::new();
    for item in parts
        .iter()
        .flat_map(|part| part.sections.iter())
        .flat_map(|section| section.items.iter())
    {
        if item.id.is_empty() || items.contains_key(&item.id) {
            continue;
        }
        items.insert(item.id.clone(), item.clone());
    }

    let totals = options.with_score.then(|| {
        let computed: ScoreSummary = parts.iter().filter_map(|part| part.totals).sum();
        ScoreSummary::new(
            map.score.unwrap_or(computed.score),
            map.max_score.unwrap_or(computed.max_score),
        )
    });

    tracing::debug!(
        parts = parts.len(),
        items = items.len(),
        warnings = warnings.len(),
        "Projected test map"
    );

    ProjectedRoot {
        parts,
        items,
        totals,
        warnings,
    }
}

fn project_part(part: &Part, options: ProjectOptions) -> ProjectedPart {
    let sections: Vec<ProjectedSection> = sorted(&part.sections, |s| s.position)
        .into_iter()
        .map(|section| project_section(section, options))
        .collect();
    let totals = options
        .with_score
        .then(|| sections.iter().filter_map(|section| section.totals).sum());

    ProjectedPart {
        id: part.id.clone().unwrap_or_default(),
        label: part.label.clone().or_else(|| part.id.clone()).unwrap_or_default(),
        position: part.position,
        totals,
        sections,
    }
}

fn project_section(section: &Section, options: ProjectOptions) -> ProjectedSection {
    let items: Vec<ProjectedItem> = sorted(&section.items, |i| i.position)
        .into_iter()
        .map(|item| project_item(item, options))
        .collect();
    let totals = options.with_score.then(|| {
        section
            .items
            .iter()
            .map(|item| {
                ScoreSummary::new(item.score.unwrap_or(0.0), item.max_score.unwrap_or(0.0))
            })
            .sum()
    });

    ProjectedSection {
        id: section.id.clone().unwrap_or_default(),
        label: section
            .label
            .clone()
            .or_else(|| section.id.clone())
            .unwrap_or_default(),
        position: section.position,
        totals,
        items,
    }
}

fn project_item(item: &Item, options: ProjectOptions) -> ProjectedItem {
    let status = classify(item, options.with_score);
    let has_correct_response_tab = classify(item, true).offers_correct_response();
    let id = item.id.clone().unwrap_or_default();
    let label = item.label.clone().unwrap_or_else(|| id.clone());

    let display_label = if options.numbered_labels {
        item.position
            .map_or_else(|| label.clone(), |position| (position + 1).to_string())
    } else {
        label.clone()
    };
    let aria_label = if status == StatusKind::Default {
        display_label.clone()
    } else {
        format!("{display_label}, {}", status.label())
    };

    ProjectedItem {
        id,
        label,
        position: item.position,
        status,
        score: if options.with_score { item.score } else { None },
        max_score: if options.with_score {
            item.max_score
        } else {
            None
        },
        display_label,
        icon: status.icon(),
        aria_label,
        has_correct_response_tab,
        correct_response_shown: options.show_correct && has_correct_response_tab,
    }
}

/// Stable sort by position; nodes without one keep their document index.
fn sorted<T>(nodes: &[T], position: impl Fn(&T) -> Option<usize>) -> Vec<&T> {
    let mut keyed: Vec<(usize, &T)> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (position(node).unwrap_or(idx), node))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, node)| node).collect()
}
