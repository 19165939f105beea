//! Configuration module for test-review.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common review setups
//! - YAML config file loading and discovery
//! - Host runner option merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_review::config::{ConfigPreset, ReviewConfig, ReviewLayout};
//!
//! // Use defaults
//! let config = ReviewConfig::default();
//!
//! // Use a preset
//! let config = ReviewConfig::from_preset(ConfigPreset::Fizzy);
//!
//! // Use builder
//! let config = ReviewConfig::builder()
//!     .layout(ReviewLayout::Fizzy)
//!     .show_correct(false)
//!     .build();
//!
//! // Load from file
//! use test_review::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.test-review.yaml` file in your project root or `~/.config/test-review/`:
//!
//! ```yaml
//! panel:
//!   layout: fizzy
//!   header_label: false
//!   filters:
//!     - id: all
//!       label: All
//!     - id: incorrect
//!       label: Incorrect
//! item_answer:
//!   score_text: "Your Score:"
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::ConfigPreset;
pub use types::{
    ItemAnswerConfig, PanelConfig, ReviewConfig, ReviewConfigBuilder, ReviewLayout, RunnerOptions,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    config_search_dirs, discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `ReviewConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.test-review.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(ReviewConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
