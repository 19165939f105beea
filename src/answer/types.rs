//! Value types of the item-answer component.

use crate::error::{ReviewError, ValidationErrorKind};
use crate::events::NamedEvent;
use crate::projection::{format_score, StatusKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Response tab of the item-answer component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerTab {
    /// The learner's own response
    #[default]
    Answer,
    /// The correct response
    Correct,
}

impl AnswerTab {
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Answer => "answer",
            Self::Correct => "correct",
        }
    }
}

impl std::fmt::Display for AnswerTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AnswerTab {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "answer" => Ok(Self::Answer),
            "correct" => Ok(Self::Correct),
            _ => Err(ReviewError::validation(
                "selecting answer tab",
                ValidationErrorKind::UnknownTab(s.to_string()),
            )),
        }
    }
}

/// A score as handed over by the host: numeric or preformatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Number(f64),
    Text(String),
}

impl ScoreValue {
    /// Render with a prefix. `0` renders; an empty string renders nothing.
    #[must_use]
    pub fn render(&self, prefix: &str) -> String {
        match self {
            Self::Number(value) => format!("{prefix} {}", format_score(*value)),
            Self::Text(text) if text.is_empty() => String::new(),
            Self::Text(text) => format!("{prefix} {text}"),
        }
    }
}

impl From<f64> for ScoreValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ScoreValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScoreValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Notifications emitted by [`ItemAnswer`](super::ItemAnswer).
///
/// For one `set_status` call, `statuschange` and `hascorrectresponsechange`
/// always precede the `tabchange`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum AnswerEvent {
    Ready,
    #[serde(rename = "statuschange")]
    StatusChange { status: StatusKind },
    #[serde(rename = "hascorrectresponsechange")]
    HasCorrectResponseChange {
        #[serde(rename = "hasCorrectResponse")]
        has_correct_response: bool,
    },
    #[serde(rename = "tabchange")]
    TabChange { tab: AnswerTab },
    Enable,
    Disable,
    Destroy,
}

impl NamedEvent for AnswerEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::StatusChange { .. } => "statuschange",
            Self::HasCorrectResponseChange { .. } => "hascorrectresponsechange",
            Self::TabChange { .. } => "tabchange",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Destroy => "destroy",
        }
    }
}

/// Snapshot of the item-answer display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub status: StatusKind,
    pub status_label: &'static str,
    pub icon: Option<&'static str>,
    pub has_correct_response_tab: bool,
    pub active_tab: AnswerTab,
    pub tabs: Vec<TabView>,
    pub score: String,
    /// Present only while the learner has no response
    pub no_answer_text: Option<String>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub tab: AnswerTab,
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}
