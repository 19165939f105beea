//! Host lifecycle events and reviewer actions fed into the bridge.

use crate::answer::AnswerTab;
use crate::error::{ParseErrorKind, ReviewError, Result};
use crate::model::TestMap;
use serde::{Deserialize, Serialize};

/// Lifecycle events emitted by the host runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HostEvent {
    /// The runner's map changed; `None` means "ask the runner for it"
    TestMapChange {
        #[serde(default)]
        map: Option<TestMap>,
    },
    /// An item started loading; `None` means "use the test context"
    LoadItem {
        #[serde(default, rename = "itemId")]
        item_id: Option<String>,
    },
    /// An item finished rendering
    RenderItem {
        #[serde(default, rename = "itemId")]
        item_id: Option<String>,
        #[serde(default = "default_true", rename = "hasResponse")]
        has_response: bool,
    },
    EnableNav,
    DisableNav,
    /// The runner reported a failure
    Error {
        #[serde(default)]
        message: String,
    },
    Destroy,
}

fn default_true() -> bool {
    true
}

impl HostEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TestMapChange { .. } => "testmapchange",
            Self::LoadItem { .. } => "loaditem",
            Self::RenderItem { .. } => "renderitem",
            Self::EnableNav => "enablenav",
            Self::DisableNav => "disablenav",
            Self::Error { .. } => "error",
            Self::Destroy => "destroy",
        }
    }
}

/// Interactions of the reviewer with the review components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReviewerAction {
    /// Click on an item in the panel
    SelectItem {
        #[serde(rename = "itemId")]
        item_id: String,
    },
    /// Click on a filter button
    SelectFilter {
        #[serde(rename = "filterId")]
        filter_id: String,
    },
    /// Click on a response tab
    SelectTab { tab: AnswerTab },
}

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Host(HostEvent),
    Reviewer(ReviewerAction),
}

/// Parse a newline-delimited JSON script. Blank lines and `#` comments are
/// skipped; reported line numbers count them.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim_start();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|err| {
                ReviewError::parse(
                    "reading replay script",
                    ParseErrorKind::InvalidEvent {
                        line: idx + 1,
                        message: err.to_string(),
                    },
                )
            })
        })
        .collect()
}
