//! Events fired by the review panel.

use crate::events::NamedEvent;
use serde::Serialize;

/// Notifications emitted by [`ReviewPanel`](super::ReviewPanel), in the order
/// documented on each operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum PanelEvent {
    /// Fired once by `start()`
    Ready,
    /// New source map accepted; always precedes the matching `Update`
    DataChange,
    /// Displayed (filtered) view recomputed
    Update,
    /// Active item changed, whoever changed it
    Active {
        #[serde(rename = "itemId")]
        item_id: String,
    },
    /// The reviewer clicked an item; the host should jump to it
    #[serde(rename = "itemchange")]
    ItemChange {
        #[serde(rename = "itemId")]
        item_id: String,
        position: usize,
    },
    #[serde(rename = "filterchange")]
    FilterChange {
        #[serde(rename = "filterId")]
        filter_id: String,
    },
    Expand {
        #[serde(rename = "sectionId")]
        section_id: String,
    },
    Collapse {
        #[serde(rename = "sectionId")]
        section_id: String,
    },
    Enable,
    Disable,
    Destroy,
}

impl NamedEvent for PanelEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::DataChange => "datachange",
            Self::Update => "update",
            Self::Active { .. } => "active",
            Self::ItemChange { .. } => "itemchange",
            Self::FilterChange { .. } => "filterchange",
            Self::Expand { .. } => "expand",
            Self::Collapse { .. } => "collapse",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Destroy => "destroy",
        }
    }
}
