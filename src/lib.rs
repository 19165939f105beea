//! **Review-mode navigation core for assessment test runners.**
//!
//! `test-review` turns a test map (the part / section / item hierarchy of a
//! delivered test, with per-item scores) into what a reviewer sees once the
//! test is over: a navigation panel with score totals and outcome badges, and
//! a per-item widget offering the learner's response next to the correct one.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The [`TestMap`] as delivered by the runner, plus
//!   [`collect_warnings`] for malformed input.
//! - **[`projection`]**: Pure functions. [`project`] classifies every item into a
//!   [`StatusKind`] and aggregates scores; [`ReviewFilter`] restricts a map to one
//!   outcome.
//! - **[`panel`]**: [`ReviewPanel`], the stateful navigation panel (active item,
//!   active filter, folded sections, accordion or grid layout).
//! - **[`answer`]**: [`ItemAnswer`], status and response tabs of the item on screen.
//! - **[`bridge`]**: [`NavigationBridge`] wires both components to a [`HostRunner`].
//! - **[`config`]**: Review settings, presets, YAML config files and runner options.
//! - **[`reports`]**: JSON and shell renderings of a panel.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use test_review::{load_test_map, PanelConfig, ReviewPanel};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let map = load_test_map(Path::new("path/to/map.json"))?;
//!
//!     let mut panel = ReviewPanel::new(PanelConfig::default());
//!     panel.start();
//!     panel.set_data(&map);
//!     panel.set_active_filter("incorrect")?;
//!
//!     println!("{} items to review", panel.view().visible_item_count());
//!     Ok(())
//! }
//! ```
//!
//! ### Driving a runner
//!
//! ```no_run
//! use test_review::{NavigationBridge, RecordingHost, ReviewConfig, TestMap};
//!
//! let mut bridge = NavigationBridge::new(RecordingHost::new(TestMap::default()), ReviewConfig::default());
//! bridge.start();
//! bridge.select_item("item-2");
//! for command in bridge.host().commands() {
//!     println!("{}", command.name());
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Score math converts between usize counts and f64 scores
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Config structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::similar_names
)]

pub mod answer;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod panel;
pub mod projection;
pub mod reports;

// Re-export main types for convenience
pub use answer::{AnswerEvent, AnswerTab, ItemAnswer, ScoreValue};
pub use bridge::{
    HostCommand, HostEvent, HostRunner, NavigationBridge, RecordingHost, ReviewerAction,
    TestContext,
};
pub use config::{
    ConfigError, ConfigPreset, ItemAnswerConfig, PanelConfig, ReviewConfig, ReviewConfigBuilder,
    ReviewLayout, RunnerOptions, Validatable,
};
pub use error::{ErrorContext, OptionContext, Result, ReviewError};
pub use events::{EventEmitter, EventQueue, ListenerId, NamedEvent};
pub use model::{collect_warnings, load_test_map, Item, MapWarning, Part, Section, TestMap};
pub use panel::{PanelEvent, PanelView, ReviewPanel};
pub use projection::{
    filter_test_map, project, FilterDescriptor, ProjectOptions, ProjectedRoot, ReviewFilter,
    StatusKind,
};
pub use reports::{ReportFormat, ReportGenerator};
