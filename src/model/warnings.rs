//! Non-fatal findings about an incomplete or inconsistent test map.

use super::TestMap;
use serde::Serialize;
use std::collections::HashSet;

/// Which level of the map a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Part,
    Section,
    Item,
}

impl NodeKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Part => "part",
            Self::Section => "section",
            Self::Item => "item",
        }
    }
}

/// A malformed-map finding. The map is still projected best-effort.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapWarning {
    /// Node has no id; `path` is its index path, e.g. `0/1/3`
    MissingId { node: NodeKind, path: String },
    /// Node has no position; sibling order falls back to document order
    MissingPosition { node: NodeKind, id: String },
    /// Item id seen more than once; only the first occurrence is addressable
    DuplicateItemId { id: String },
    NegativeMaxScore { id: String, max_score: f64 },
}

impl std::fmt::Display for MapWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId { node, path } => {
                write!(f, "{} at {path} has no id", node.label())
            }
            Self::MissingPosition { node, id } => {
                write!(f, "{} '{id}' has no position", node.label())
            }
            Self::DuplicateItemId { id } => write!(f, "item id '{id}' is not unique"),
            Self::NegativeMaxScore { id, max_score } => {
                write!(f, "item '{id}' has negative max score {max_score}")
            }
        }
    }
}

/// Scan a map for malformed nodes.
///
/// Every warning is also logged; callers decide whether to surface them.
#[must_use]
pub fn collect_warnings(map: &TestMap) -> Vec<MapWarning> {
    let mut warnings = Vec::new();
    let mut seen_items = HashSet::new();

    for (p_idx, part) in map.parts.iter().enumerate() {
        check_node(
            &mut warnings,
            NodeKind::Part,
            part.id.as_deref(),
            part.position,
            || p_idx.to_string(),
        );
        for (s_idx, section) in part.sections.iter().enumerate() {
            check_node(
                &mut warnings,
                NodeKind::Section,
                section.id.as_deref(),
                section.position,
                || format!("{p_idx}/{s_idx}"),
            );
            for (i_idx, item) in section.items.iter().enumerate() {
                check_node(
                    &mut warnings,
                    NodeKind::Item,
                    item.id.as_deref(),
                    item.position,
                    || format!("{p_idx}/{s_idx}/{i_idx}"),
                );
                if let Some(id) = item.id.as_deref() {
                    if !seen_items.insert(id) {
                        warnings.push(MapWarning::DuplicateItemId { id: id.to_string() });
                    }
                    if let Some(max_score) = item.max_score.filter(|m| *m < 0.0) {
                        warnings.push(MapWarning::NegativeMaxScore {
                            id: id.to_string(),
                            max_score,
                        });
                    }
                }
            }
        }
    }

    for warning in &warnings {
        tracing::warn!("Malformed test map: {warning}");
    }
    warnings
}

fn check_node(
    warnings: &mut Vec<MapWarning>,
    node: NodeKind,
    id: Option<&str>,
    position: Option<usize>,
    path: impl FnOnce() -> String,
) {
    match id {
        None => warnings.push(MapWarning::MissingId { node, path: path() }),
        Some(id) if position.is_none() => warnings.push(MapWarning::MissingPosition {
            node,
            id: id.to_string(),
        }),
        Some(_) => {}
    }
}
