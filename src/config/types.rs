//! Configuration types for the review panel and the item-answer component.

use crate::error::{ReviewError, ValidationErrorKind};
use crate::projection::{FilterDescriptor, ReviewFilter};
use schemars::JsonSchema;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::str::FromStr;

// ============================================================================
// Unified Review Configuration
// ============================================================================

/// Top-level configuration, loadable from a YAML file.
///
/// Host runner options (see [`RunnerOptions`]) are layered on top with
/// [`ReviewConfig::apply_runner_options`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReviewConfig {
    /// Navigation panel settings
    pub panel: PanelConfig,
    /// Item answer (status + response tabs) settings
    pub item_answer: ItemAnswerConfig,
}

impl ReviewConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ReviewConfigBuilder {
        ReviewConfigBuilder::default()
    }

    /// Layer the host runner's options over this configuration.
    ///
    /// The host owns these five flags; its values always win.
    pub fn apply_runner_options(&mut self, options: &RunnerOptions) {
        self.panel.show_score = options.show_score;
        self.panel.show_correct = options.show_correct;
        self.panel.display_section_titles = options.display_section_titles;
        self.panel.display_item_tooltip = options.display_item_tooltip;
        self.panel.layout = options.review_layout;
        self.item_answer.show_correct = options.show_correct;
    }
}

// ============================================================================
// Builder for ReviewConfig
// ============================================================================

/// Fluent builder for [`ReviewConfig`].
#[derive(Debug, Default)]
#[must_use]
pub struct ReviewConfigBuilder {
    config: ReviewConfig,
}

impl ReviewConfigBuilder {
    /// Show scores in the panel header and item statuses.
    pub const fn show_score(mut self, show: bool) -> Self {
        self.config.panel.show_score = show;
        self
    }

    /// Allow the correct response to be displayed (panel and item answer).
    pub const fn show_correct(mut self, show: bool) -> Self {
        self.config.panel.show_correct = show;
        self.config.item_answer.show_correct = show;
        self
    }

    pub const fn layout(mut self, layout: ReviewLayout) -> Self {
        self.config.panel.layout = layout;
        self
    }

    pub const fn display_section_titles(mut self, display: bool) -> Self {
        self.config.panel.display_section_titles = display;
        self
    }

    pub const fn display_item_tooltip(mut self, display: bool) -> Self {
        self.config.panel.display_item_tooltip = display;
        self
    }

    /// Header label; `None` hides the header.
    pub fn header_label(mut self, label: Option<String>) -> Self {
        self.config.panel.header_label = label;
        self
    }

    /// Footer label; `None` hides the footer.
    pub fn footer_label(mut self, label: Option<String>) -> Self {
        self.config.panel.footer_label = label;
        self
    }

    pub fn filters(mut self, filters: Vec<FilterDescriptor>) -> Self {
        self.config.panel.filters = filters;
        self
    }

    pub fn score_text(mut self, text: impl Into<String>) -> Self {
        self.config.item_answer.score_text = text.into();
        self
    }

    #[must_use]
    pub fn build(self) -> ReviewConfig {
        self.config
    }
}

// ============================================================================
// Panel Configuration
// ============================================================================

/// Presentation variant of the review panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewLayout {
    /// Accordion of collapsible sections
    #[default]
    #[serde(alias = "accordion")]
    Default,
    /// Grid of numbered item buttons
    Fizzy,
}

impl ReviewLayout {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fizzy => "fizzy",
        }
    }
}

impl std::fmt::Display for ReviewLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReviewLayout {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "accordion" => Ok(Self::Default),
            "fizzy" | "grid" => Ok(Self::Fizzy),
            _ => Err(ReviewError::validation(
                "parsing review layout",
                ValidationErrorKind::UnknownLayout(s.to_string()),
            )),
        }
    }
}

/// Review panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PanelConfig {
    /// Show scores, statuses and the score header
    pub show_score: bool,
    /// Show the correct response to the reviewer
    pub show_correct: bool,
    /// Show section titles in the grid layout
    pub display_section_titles: bool,
    /// Show item tooltips in the grid layout
    pub display_item_tooltip: bool,
    /// Header label, or `false` to hide the header
    #[serde(deserialize_with = "label_or_false")]
    pub header_label: Option<String>,
    /// Footer label, or `false` to hide the footer
    #[serde(deserialize_with = "label_or_false")]
    pub footer_label: Option<String>,
    /// Filters offered by the panel; the first one is active initially
    pub filters: Vec<FilterDescriptor>,
    /// Presentation variant
    pub layout: ReviewLayout,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            show_score: true,
            show_correct: true,
            display_section_titles: true,
            display_item_tooltip: false,
            header_label: Some("TEST SCORE:".to_string()),
            footer_label: Some("TOTAL".to_string()),
            filters: vec![
                ReviewFilter::All.descriptor(),
                ReviewFilter::Incorrect.descriptor(),
            ],
            layout: ReviewLayout::Default,
        }
    }
}

/// Accept a label string, or `false` / `null` to disable it.
fn label_or_false<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LabelSetting {
        Text(String),
        Flag(bool),
    }

    match Option::<LabelSetting>::deserialize(deserializer)? {
        None | Some(LabelSetting::Flag(false)) => Ok(None),
        Some(LabelSetting::Text(text)) => Ok(Some(text)),
        Some(LabelSetting::Flag(true)) => Err(D::Error::custom(
            "expected a label string or `false`, got `true`",
        )),
    }
}

// ============================================================================
// Item Answer Configuration
// ============================================================================

/// Item answer component settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ItemAnswerConfig {
    /// Offer the correct-response tab when the item has one
    pub show_correct: bool,
    /// Prefix of the rendered score line
    pub score_text: String,
    /// Text shown when the learner gave no response
    pub no_answer_text: String,
    pub answer_tab_label: String,
    pub correct_tab_label: String,
}

impl Default for ItemAnswerConfig {
    fn default() -> Self {
        Self {
            show_correct: true,
            score_text: "Your Score:".to_string(),
            no_answer_text: "No response".to_string(),
            answer_tab_label: "Your response".to_string(),
            correct_tab_label: "Correct response".to_string(),
        }
    }
}

// ============================================================================
// Host Runner Options
// ============================================================================

/// Options exposed by the host runner (`getOptions()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RunnerOptions {
    pub show_score: bool,
    pub show_correct: bool,
    pub display_section_titles: bool,
    pub display_item_tooltip: bool,
    pub review_layout: ReviewLayout,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        let panel = PanelConfig::default();
        Self {
            show_score: panel.show_score,
            show_correct: panel.show_correct,
            display_section_titles: panel.display_section_titles,
            display_item_tooltip: panel.display_item_tooltip,
            review_layout: panel.layout,
        }
    }
}

impl From<&ReviewConfig> for RunnerOptions {
    fn from(config: &ReviewConfig) -> Self {
        Self {
            show_score: config.panel.show_score,
            show_correct: config.panel.show_correct,
            display_section_titles: config.panel.display_section_titles,
            display_item_tooltip: config.panel.display_item_tooltip,
            review_layout: config.panel.layout,
        }
    }
}
