//! Configuration validation for test-review.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{ItemAnswerConfig, PanelConfig, ReviewConfig};
use crate::projection::ReviewFilter;
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for ReviewConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.panel.validate();
        errors.extend(self.item_answer.validate());
        errors
    }
}

impl Validatable for PanelConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (idx, descriptor) in self.filters.iter().enumerate() {
            if ReviewFilter::from_id(&descriptor.id).is_none() {
                let valid: Vec<_> = ReviewFilter::ALL.iter().map(ReviewFilter::id).collect();
                errors.push(ConfigError::new(
                    format!("panel.filters[{idx}].id"),
                    format!(
                        "Unknown filter '{}'. Valid options: {}",
                        descriptor.id,
                        valid.join(", ")
                    ),
                ));
            } else if !seen.insert(descriptor.id.as_str()) {
                errors.push(ConfigError::new(
                    format!("panel.filters[{idx}].id"),
                    format!("Filter '{}' is listed more than once", descriptor.id),
                ));
            }
            if descriptor.label.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("panel.filters[{idx}].label"),
                    "Filter label must not be empty",
                ));
            }
        }

        for (field, label) in [
            ("panel.header_label", &self.header_label),
            ("panel.footer_label", &self.footer_label),
        ] {
            if label.as_deref().is_some_and(|l| l.trim().is_empty()) {
                errors.push(ConfigError::new(
                    field,
                    "Label must not be empty; use `false` to hide it",
                ));
            }
        }

        errors
    }
}

impl Validatable for ItemAnswerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        [
            ("item_answer.score_text", &self.score_text),
            ("item_answer.answer_tab_label", &self.answer_tab_label),
            ("item_answer.correct_tab_label", &self.correct_tab_label),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| ConfigError::new(field, "Must not be empty"))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::FilterDescriptor;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ReviewConfig::default().is_valid());
        for preset in crate::config::ConfigPreset::all() {
            assert!(ReviewConfig::from_preset(*preset).is_valid(), "{preset}");
        }
    }

    #[test]
    fn test_filter_validation() {
        let config = PanelConfig {
            filters: vec![
                FilterDescriptor::new("all", "All"),
                FilterDescriptor::new("all", "Everything"),
                FilterDescriptor::new("flagged", "Flagged"),
                FilterDescriptor::new("pending", " "),
            ],
            ..PanelConfig::default()
        };
        let errors = config.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "panel.filters[1].id",
                "panel.filters[2].id",
                "panel.filters[3].label"
            ]
        );
        assert!(errors[1].message.contains("informational"));
    }

    #[test]
    fn test_empty_header_label_rejected() {
        let config = PanelConfig {
            header_label: Some(String::new()),
            footer_label: None,
            ..PanelConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "panel.header_label");
    }

    #[test]
    fn test_item_answer_labels() {
        let config = ItemAnswerConfig {
            correct_tab_label: String::new(),
            ..ItemAnswerConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "item_answer.correct_tab_label: Must not be empty"
        );
    }
}
