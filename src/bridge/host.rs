//! The host runner seam.
//!
//! The review components never reach into the runner directly; they are
//! handed a [`HostRunner`] implementation by the
//! [`NavigationBridge`](super::NavigationBridge).

use crate::config::RunnerOptions;
use crate::model::TestMap;
use serde::{Deserialize, Serialize};

/// Where the runner currently is (`getTestContext()`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestContext {
    pub item_identifier: Option<String>,
    pub item_position: Option<usize>,
}

/// Granularity of a runner jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpScope {
    #[default]
    Item,
    Section,
    Part,
}

/// Which response the item runner displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseView {
    /// The learner's recorded response
    Learner,
    /// The correct response
    Correct,
}

/// Narrow interface onto the assessment runner.
pub trait HostRunner {
    /// Current test map (`getTestMap()`).
    fn test_map(&self) -> TestMap;

    /// Current location (`getTestContext()`).
    fn test_context(&self) -> TestContext;

    /// Review options (`getOptions()`).
    fn options(&self) -> RunnerOptions;

    /// Navigate to a test position.
    fn jump(&mut self, position: usize, scope: JumpScope);

    /// Replace the runner's test map.
    fn set_test_map(&mut self, map: TestMap);

    /// Swap the item runner between the learner and the correct response.
    fn display_response(&mut self, view: ResponseView);
}

/// A command issued to the host, as recorded by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostCommand {
    Jump { position: usize, scope: JumpScope },
    SetTestMap { map: TestMap },
    DisplayResponse { view: ResponseView },
}

impl HostCommand {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Jump { .. } => "jump",
            Self::SetTestMap { .. } => "setTestMap",
            Self::DisplayResponse { .. } => "displayResponse",
        }
    }
}

/// In-memory runner that records every command it receives.
///
/// `jump` moves its test context to the item at the requested position and
/// `set_test_map` replaces the map it serves.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    map: TestMap,
    context: TestContext,
    options: RunnerOptions,
    commands: Vec<HostCommand>,
}

impl RecordingHost {
    #[must_use]
    pub fn new(map: TestMap) -> Self {
        Self {
            map,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: TestContext) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the log empty.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl HostRunner for RecordingHost {
    fn test_map(&self) -> TestMap {
        self.map.clone()
    }

    fn test_context(&self) -> TestContext {
        self.context.clone()
    }

    fn options(&self) -> RunnerOptions {
        self.options
    }

    fn jump(&mut self, position: usize, scope: JumpScope) {
        self.commands.push(HostCommand::Jump { position, scope });
        self.context = TestContext {
            item_identifier: self
                .map
                .items()
                .find(|item| item.position == Some(position))
                .and_then(|item| item.id.clone()),
            item_position: Some(position),
        };
    }

    fn set_test_map(&mut self, map: TestMap) {
        self.map = map.clone();
        self.commands.push(HostCommand::SetTestMap { map });
    }

    fn display_response(&mut self, view: ResponseView) {
        self.commands.push(HostCommand::DisplayResponse { view });
    }
}
