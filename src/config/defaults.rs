//! Named configuration presets.

use super::types::{ItemAnswerConfig, PanelConfig, ReviewConfig, ReviewLayout};

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common review setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Accordion panel with scores and correct responses
    Default,
    /// Numbered grid panel with scores and correct responses
    Fizzy,
    /// No scores and no correct responses, only navigation
    Blind,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fizzy => "fizzy",
            Self::Blind => "blind",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "accordion" => Some(Self::Default),
            "fizzy" | "grid" => Some(Self::Fizzy),
            "blind" | "navigation-only" => Some(Self::Blind),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Accordion panel showing scores, statuses and correct responses",
            Self::Fizzy => "Grid of numbered item buttons showing scores and correct responses",
            Self::Blind => "Navigation only: no scores, no statuses, no correct responses",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Fizzy, Self::Blind]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl ReviewConfig {
    /// Create a configuration from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Fizzy => Self::fizzy_preset(),
            ConfigPreset::Blind => Self::blind_preset(),
        }
    }

    /// Grid layout with tooltips.
    #[must_use]
    pub fn fizzy_preset() -> Self {
        Self {
            panel: PanelConfig {
                layout: ReviewLayout::Fizzy,
                display_item_tooltip: true,
                ..PanelConfig::default()
            },
            item_answer: ItemAnswerConfig::default(),
        }
    }

    /// Navigation without any scoring information.
    #[must_use]
    pub fn blind_preset() -> Self {
        Self {
            panel: PanelConfig {
                show_score: false,
                show_correct: false,
                header_label: None,
                footer_label: None,
                filters: Vec::new(),
                ..PanelConfig::default()
            },
            item_answer: ItemAnswerConfig {
                show_correct: false,
                ..ItemAnswerConfig::default()
            },
        }
    }
}
