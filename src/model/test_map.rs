//! Test map records: `TestMap` → `Part` → `Section` → `Item`.

use crate::error::{ErrorContext, ReviewError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Hierarchical description of a delivered test.
///
/// `score` / `max_score` are the host-supplied test totals. When present they
/// take precedence over the bottom-up sums computed during projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "seq_or_map")]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
}

/// A test part (top-level container).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(deserialize_with = "seq_or_map")]
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
}

/// A section inside a part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(deserialize_with = "seq_or_map")]
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
}

/// A leaf item and the learner's recorded outcome.
///
/// `score` is `None` when the item was never attempted. `position` is the
/// item's position in the whole test and is what the host jumps to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    pub informational: bool,
    pub skipped: bool,
    pub is_externally_scored: bool,
    pub pending_external_score: bool,
}

// ============================================================================
// Construction helpers
// ============================================================================

impl TestMap {
    /// Create a map from its parts.
    #[must_use]
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            parts,
            ..Self::default()
        }
    }

    /// Supply explicit test totals.
    #[must_use]
    pub const fn with_totals(mut self, score: f64, max_score: f64) -> Self {
        self.score = Some(score);
        self.max_score = Some(max_score);
        self
    }

    /// Parse a map from JSON. `null` yields an empty map.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: Option<Self> = serde_json::from_str(json).context("parsing test map")?;
        Ok(map.unwrap_or_default())
    }

    /// Iterate over every leaf item in document order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.parts
            .iter()
            .flat_map(|part| part.sections.iter())
            .flat_map(|section| section.items.iter())
    }

    /// Find an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items().find(|item| item.id.as_deref() == Some(id))
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    /// True when the map has no items at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }
}

impl Part {
    #[must_use]
    pub fn new(id: impl Into<String>, position: usize, sections: Vec<Section>) -> Self {
        Self {
            id: Some(id.into()),
            position: Some(position),
            sections,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Section {
    #[must_use]
    pub fn new(id: impl Into<String>, position: usize, items: Vec<Item>) -> Self {
        Self {
            id: Some(id.into()),
            position: Some(position),
            items,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Item {
    #[must_use]
    pub fn new(id: impl Into<String>, position: usize) -> Self {
        Self {
            id: Some(id.into()),
            position: Some(position),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the recorded score. `None` means the item was never attempted.
    #[must_use]
    pub const fn with_score(mut self, score: Option<f64>, max_score: f64) -> Self {
        self.score = score;
        self.max_score = Some(max_score);
        self
    }

    #[must_use]
    pub const fn informational(mut self) -> Self {
        self.informational = true;
        self
    }

    #[must_use]
    pub const fn skipped(mut self) -> Self {
        self.skipped = true;
        self
    }

    /// Mark the item as externally scored, optionally still awaiting its score.
    #[must_use]
    pub const fn externally_scored(mut self, pending: bool) -> Self {
        self.is_externally_scored = true;
        self.pending_external_score = pending;
        self
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load a test map from a JSON file.
pub fn load_test_map(path: &Path) -> Result<TestMap> {
    let content = std::fs::read_to_string(path).map_err(|e| ReviewError::io(path, e))?;
    TestMap::from_json_str(&content).with_context(|| format!("loading {}", path.display()))
}

/// Nodes whose id may be supplied as the key of an id-keyed object.
trait Keyed {
    fn fill_missing_id(&mut self, key: String);
}

macro_rules! impl_keyed {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            fn fill_missing_id(&mut self, key: String) {
                if self.id.is_none() {
                    self.id = Some(key);
                }
            }
        })*
    };
}

impl_keyed!(Part, Section, Item);

#[derive(Deserialize)]
#[serde(untagged)]
enum SeqOrMap<T> {
    Seq(Vec<T>),
    Map(IndexMap<String, T>),
}

/// Accept a container either as an array or as an object keyed by id.
fn seq_or_map<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Keyed,
{
    let value = Option::<SeqOrMap<T>>::deserialize(deserializer)?;
    Ok(match value {
        None => Vec::new(),
        Some(SeqOrMap::Seq(nodes)) => nodes,
        Some(SeqOrMap::Map(nodes)) => nodes
            .into_iter()
            .map(|(key, mut node)| {
                node.fill_missing_id(key);
                node
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_empty_map() {
        let map = TestMap::from_json_str("{}").expect("empty object parses");
        assert!(map.parts.is_empty());
        assert!(map.is_empty());
    }

    #[test]
    fn test_null_is_empty_map() {
        let map = TestMap::from_json_str("null").expect("null parses");
        assert_eq!(map, TestMap::default());
    }

    #[test]
    fn test_array_form() {
        let json = r#"{
            "parts": [{
                "id": "p1", "position": 0,
                "sections": [{
                    "id": "s1", "position": 0,
                    "items": [
                        {"id": "i1", "position": 0, "score": 1, "maxScore": 1},
                        {"id": "i2", "position": 1, "score": null, "maxScore": 2}
                    ]
                }]
            }]
        }"#;
        let map = TestMap::from_json_str(json).expect("array form parses");
        assert_eq!(map.item_count(), 2);
        assert_eq!(map.item("i1").and_then(|i| i.score), Some(1.0));
        assert_eq!(map.item("i2").and_then(|i| i.score), None);
        assert_eq!(map.item("i2").and_then(|i| i.max_score), Some(2.0));
    }

    #[test]
    fn test_keyed_object_form_fills_ids() {
        let json = r#"{
            "parts": {
                "p1": {"position": 0, "sections": {
                    "s1": {"position": 0, "items": {
                        "i1": {"position": 0, "isExternallyScored": true, "pendingExternalScore": true}
                    }}
                }}
            }
        }"#;
        let map = TestMap::from_json_str(json).expect("keyed form parses");
        assert_eq!(map.parts[0].id.as_deref(), Some("p1"));
        assert_eq!(map.parts[0].sections[0].id.as_deref(), Some("s1"));
        let item = map.item("i1").expect("item keyed by id");
        assert!(item.is_externally_scored);
        assert!(item.pending_external_score);
    }

    #[test]
    fn test_missing_containers_tolerated() {
        let json = r#"{"parts": [{"id": "p1"}, {"id": "p2", "sections": null}]}"#;
        let map = TestMap::from_json_str(json).expect("partial map parses");
        assert_eq!(map.parts.len(), 2);
        assert!(map.parts.iter().all(|p| p.sections.is_empty()));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = TestMap::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ReviewError::Parse { .. }));
        assert!(err.to_string().contains("parsing test map"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_test_map(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ReviewError::Io { .. }));
    }
}
