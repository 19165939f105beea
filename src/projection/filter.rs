//! Review filters and structural pruning.
//!
//! Filtering works on owned copies: the source projection or map is never
//! touched, and containers left empty by a predicate are dropped instead of
//! being kept as empty stubs.

use super::projector::{ProjectedItem, ProjectedPart, ProjectedSection};
use super::status::{classify, StatusKind};
use crate::error::{ReviewError, Result};
use crate::model::{Item, Part, Section, TestMap};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Built-in review filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewFilter {
    #[default]
    All,
    Correct,
    Incorrect,
    Partial,
    Pending,
    Informational,
}

impl ReviewFilter {
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Correct,
        Self::Incorrect,
        Self::Partial,
        Self::Pending,
        Self::Informational,
    ];

    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Partial => "partial",
            Self::Pending => "pending",
            Self::Informational => "informational",
        }
    }

    #[must_use]
    pub const fn default_label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
            Self::Partial => "Partially correct",
            Self::Pending => "Pending",
            Self::Informational => "Informational",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.id() == id)
    }

    /// Whether an item with this status stays visible.
    #[must_use]
    pub const fn matches(&self, status: StatusKind) -> bool {
        match self {
            Self::All => true,
            Self::Correct => matches!(status, StatusKind::Correct),
            Self::Incorrect => matches!(status, StatusKind::Incorrect),
            Self::Partial => matches!(status, StatusKind::Partial),
            Self::Pending => matches!(status, StatusKind::Pending),
            Self::Informational => matches!(status, StatusKind::Informational),
        }
    }

    /// Descriptor carrying the default label.
    #[must_use]
    pub fn descriptor(&self) -> FilterDescriptor {
        FilterDescriptor::new(self.id(), self.default_label())
    }
}

impl std::fmt::Display for ReviewFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ReviewFilter {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_id(s).ok_or_else(|| ReviewError::unknown_filter(s))
    }
}

/// A filter offered by a panel, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterDescriptor {
    /// Filter id (`all`, `correct`, `incorrect`, `partial`, `pending`, `informational`)
    pub id: String,
    /// Label shown on the filter control
    pub label: String,
}

impl FilterDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Resolve the descriptor id to a built-in filter.
    pub fn filter(&self) -> Result<ReviewFilter> {
        self.id.parse()
    }
}

/// Keep items matching `predicate`, dropping emptied sections and parts.
#[must_use]
pub fn filter_parts(
    parts: &[ProjectedPart],
    predicate: impl Fn(&ProjectedItem) -> bool,
) -> Vec<ProjectedPart> {
    parts
        .iter()
        .filter_map(|part| {
            let sections: Vec<ProjectedSection> = part
                .sections
                .iter()
                .filter_map(|section| {
                    let items: Vec<ProjectedItem> = section
                        .items
                        .iter()
                        .filter(|item| predicate(item))
                        .cloned()
                        .collect();
                    (!items.is_empty()).then(|| ProjectedSection {
                        items,
                        ..section.clone_shell()
                    })
                })
                .collect();
            (!sections.is_empty()).then(|| ProjectedPart {
                sections,
                ..part.clone_shell()
            })
        })
        .collect()
}

/// Apply a built-in filter to projected parts.
#[must_use]
pub fn apply_filter(parts: &[ProjectedPart], filter: ReviewFilter) -> Vec<ProjectedPart> {
    if filter == ReviewFilter::All {
        return parts.to_vec();
    }
    filter_parts(parts, |item| filter.matches(item.status))
}

/// Prune a raw test map, e.g. before handing a filtered map to the host.
///
/// Test-level totals are carried over unchanged.
#[must_use]
pub fn filter_test_map(map: &TestMap, predicate: impl Fn(&Item) -> bool) -> TestMap {
    let parts = map
        .parts
        .iter()
        .filter_map(|part| {
            let sections: Vec<Section> = part
                .sections
                .iter()
                .filter_map(|section| {
                    let items: Vec<Item> = section
                        .items
                        .iter()
                        .filter(|item| predicate(item))
                        .cloned()
                        .collect();
                    (!items.is_empty()).then(|| Section {
                        id: section.id.clone(),
                        label: section.label.clone(),
                        position: section.position,
                        items,
                        score: section.score,
                        max_score: section.max_score,
                    })
                })
                .collect();
            (!sections.is_empty()).then(|| Part {
                id: part.id.clone(),
                label: part.label.clone(),
                position: part.position,
                sections,
                score: part.score,
                max_score: part.max_score,
            })
        })
        .collect();

    TestMap {
        title: map.title.clone(),
        parts,
        score: map.score,
        max_score: map.max_score,
    }
}

/// Prune a raw map with a built-in filter, classifying items on the fly.
#[must_use]
pub fn filter_test_map_by(map: &TestMap, filter: ReviewFilter, with_score: bool) -> TestMap {
    filter_test_map(map, |item| filter.matches(classify(item, with_score)))
}

impl ProjectedSection {
    /// Copy of the section metadata without its items.
    fn clone_shell(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            position: self.position,
            totals: self.totals,
            items: Vec::new(),
        }
    }
}

impl ProjectedPart {
    /// Copy of the part metadata without its sections.
    fn clone_shell(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            position: self.position,
            totals: self.totals,
            sections: Vec::new(),
        }
    }
}
