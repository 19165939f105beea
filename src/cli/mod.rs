//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod output;
mod project;
mod replay;
mod validate;

pub use output::{should_use_color, write_output, OutputTarget};
pub use project::{build_panel_report, run_project, ProjectCommand};
pub use replay::{replay_script, run_replay, ReplayCommand, ReplayLog, ReplayRecord};
pub use validate::{run_validate, validate_map, ValidationOutcome};

// Re-export config types used by handlers
pub use crate::config::{ConfigPreset, ReviewConfig, ReviewLayout};
