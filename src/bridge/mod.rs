//! NavigationBridge: wires the review panel and the item-answer component
//! to a host runner.
//!
//! | Host event      | Reaction                                              |
//! |-----------------|-------------------------------------------------------|
//! | `testmapchange` | `panel.set_data(map)`                                 |
//! | `loaditem`      | `panel.set_active_item(id)`                           |
//! | `renderitem`    | item answer status, score and "no response" flag      |
//! | `enablenav`     | enable panel and item answer                          |
//! | `disablenav`    | disable panel and item answer                         |
//! | `error`         | enable panel, disable item answer                     |
//!
//! | Component event | Host command                                          |
//! |-----------------|-------------------------------------------------------|
//! | `itemchange`    | `jump(position, item)`                                |
//! | `filterchange`  | `set_test_map(filtered map)`                          |
//! | `tabchange`     | `display_response(correct \| learner)`                |
//!
//! Component events are buffered in [`EventQueue`]s and turned into host
//! commands once the triggering call has returned, so no component is ever
//! re-entered from one of its own listeners.

mod events;
mod host;

pub use events::{parse_script, HostEvent, ReviewerAction, ScriptStep};
pub use host::{HostCommand, HostRunner, JumpScope, RecordingHost, ResponseView, TestContext};

use crate::answer::{AnswerEvent, AnswerTab, ItemAnswer, ScoreValue};
use crate::config::ReviewConfig;
use crate::error::Result;
use crate::events::EventQueue;
use crate::model::TestMap;
use crate::panel::{PanelEvent, ReviewPanel};
use crate::projection::{filter_test_map_by, ReviewFilter};

/// Mediator between a [`HostRunner`] and the review components.
#[derive(Debug)]
pub struct NavigationBridge<H: HostRunner> {
    host: H,
    config: ReviewConfig,
    panel: ReviewPanel,
    answer: ItemAnswer,
    panel_events: EventQueue<PanelEvent>,
    answer_events: EventQueue<AnswerEvent>,
    /// Last map pushed to the host, so its echoes can be recognised
    pushed_map: Option<TestMap>,
    destroyed: bool,
}

impl<H: HostRunner> NavigationBridge<H> {
    /// Build the components. The host's options override `config`.
    pub fn new(host: H, mut config: ReviewConfig) -> Self {
        config.apply_runner_options(&host.options());
        let mut panel = ReviewPanel::new(config.panel.clone());
        let mut answer = ItemAnswer::new(config.item_answer.clone());
        let (panel_events, _) = EventQueue::attach(panel.events_mut());
        let (answer_events, _) = EventQueue::attach(answer.events_mut());

        Self {
            host,
            config,
            panel,
            answer,
            panel_events,
            answer_events,
            pushed_map: None,
            destroyed: false,
        }
    }

    /// Start both components and load the host's current map and item.
    pub fn start(&mut self) {
        if self.ignored_after_destroy("start") {
            return;
        }
        self.panel.start();
        self.answer.start();
        let map = self.host.test_map();
        self.panel.set_data(&map);
        if let Some(item_id) = self.host.test_context().item_identifier {
            self.panel.set_active_item(&item_id);
        }
        self.flush();
        tracing::debug!(items = map.item_count(), "Navigation bridge started");
    }

    /// React to a host lifecycle event.
    pub fn handle(&mut self, event: HostEvent) {
        if self.ignored_after_destroy(event.name()) {
            return;
        }
        tracing::debug!(event = event.name(), "Host event");
        match event {
            HostEvent::TestMapChange { map } => {
                let map = map.unwrap_or_else(|| self.host.test_map());
                // the host keeps serving the pushed map until it loads a new one
                if self.pushed_map.as_ref() == Some(&map) {
                    tracing::debug!("Ignoring echo of a filtered map pushed to the host");
                } else {
                    self.pushed_map = None;
                    self.panel.set_data(&map);
                }
            }
            HostEvent::LoadItem { item_id } => {
                if let Some(item_id) = item_id.or_else(|| self.host.test_context().item_identifier)
                {
                    self.panel.set_active_item(&item_id);
                }
            }
            HostEvent::RenderItem {
                item_id,
                has_response,
            } => {
                let item_id = item_id.or_else(|| self.host.test_context().item_identifier);
                self.render_item(item_id.as_deref(), has_response);
            }
            HostEvent::EnableNav => {
                self.panel.enable();
                self.answer.enable();
            }
            HostEvent::DisableNav => {
                self.panel.disable();
                self.answer.disable();
            }
            HostEvent::Error { message } => {
                tracing::warn!(%message, "Host reported an error, restoring navigation");
                self.panel.enable();
                self.answer.disable();
            }
            HostEvent::Destroy => {
                self.destroy();
                return;
            }
        }
        self.flush();
    }

    /// Apply a reviewer action.
    pub fn act(&mut self, action: ReviewerAction) -> Result<()> {
        match action {
            ReviewerAction::SelectItem { item_id } => {
                self.select_item(&item_id);
            }
            ReviewerAction::SelectFilter { filter_id } => self.select_filter(&filter_id)?,
            ReviewerAction::SelectTab { tab } => {
                self.select_tab(tab);
            }
        }
        Ok(())
    }

    /// Apply one replay script step.
    pub fn apply(&mut self, step: ScriptStep) -> Result<()> {
        match step {
            ScriptStep::Host(event) => {
                self.handle(event);
                Ok(())
            }
            ScriptStep::Reviewer(action) => self.act(action),
        }
    }

    /// Reviewer click on a panel item.
    pub fn select_item(&mut self, item_id: &str) -> bool {
        if self.ignored_after_destroy("select_item") {
            return false;
        }
        let selected = self.panel.select_item(item_id);
        self.flush();
        selected
    }

    /// Reviewer click on a filter button.
    pub fn select_filter(&mut self, filter_id: &str) -> Result<()> {
        if self.ignored_after_destroy("select_filter") {
            return Ok(());
        }
        self.panel.set_active_filter(filter_id)?;
        self.flush();
        Ok(())
    }

    /// Reviewer click on a response tab.
    pub fn select_tab(&mut self, tab: AnswerTab) -> bool {
        if self.ignored_after_destroy("select_tab") {
            return false;
        }
        let selected = self.answer.select_tab(tab);
        self.flush();
        selected
    }

    /// Destroy both components and stop reacting to the host.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.panel.destroy();
        self.answer.destroy();
        self.flush();
        self.pushed_map = None;
        self.destroyed = true;
        tracing::debug!("Navigation bridge destroyed");
    }

    #[must_use]
    pub const fn panel(&self) -> &ReviewPanel {
        &self.panel
    }

    #[must_use]
    pub const fn answer(&self) -> &ItemAnswer {
        &self.answer
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Effective configuration, host options applied.
    #[must_use]
    pub const fn config(&self) -> &ReviewConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    fn render_item(&mut self, item_id: Option<&str>, has_response: bool) {
        let Some(item) = item_id.and_then(|id| self.panel.item(id)) else {
            tracing::warn!(item = ?item_id, "Rendered item is not part of the test map");
            return;
        };
        let status = item.status;
        let has_correct_response_tab = item.has_correct_response_tab;
        let score = if self.config.panel.show_score {
            item.score.map(ScoreValue::Number)
        } else {
            None
        };
        self.answer.set_status_kind(status, has_correct_response_tab);
        self.answer.set_score(score);
        self.answer.set_has_no_answer(!has_response);
    }

    /// Turn buffered component events into host commands.
    fn flush(&mut self) {
        while !(self.panel_events.is_empty() && self.answer_events.is_empty()) {
            for event in self.panel_events.drain() {
                self.on_panel_event(event);
            }
            for event in self.answer_events.drain() {
                if let AnswerEvent::TabChange { tab } = event {
                    let view = match tab {
                        AnswerTab::Answer => ResponseView::Learner,
                        AnswerTab::Correct => ResponseView::Correct,
                    };
                    self.host.display_response(view);
                }
            }
        }
    }

    fn on_panel_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::ItemChange { position, .. } => {
                self.host.jump(position, JumpScope::Item);
            }
            PanelEvent::FilterChange { filter_id } => {
                let filter = ReviewFilter::from_id(&filter_id).unwrap_or_default();
                let filtered = filter_test_map_by(
                    self.panel.source_map(),
                    filter,
                    self.config.panel.show_score,
                );
                self.pushed_map = Some(filtered.clone());
                self.host.set_test_map(filtered);
            }
            _ => {}
        }
    }

    fn ignored_after_destroy(&self, operation: &str) -> bool {
        if self.destroyed {
            tracing::warn!(operation, "Bridge operation after destroy ignored");
        }
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, Part, Section};

    fn host() -> RecordingHost {
        RecordingHost::new(TestMap::new(vec![Part::new(
            "p1",
            0,
            vec![Section::new(
                "s1",
                0,
                vec![
                    Item::new("i1", 0).with_score(Some(1.0), 1.0),
                    Item::new("i2", 1).with_score(Some(0.0), 1.0),
                ],
            )],
        )]))
    }

    #[test]
    fn test_start_loads_host_map() {
        let mut bridge = NavigationBridge::new(host(), ReviewConfig::default());
        bridge.start();
        assert_eq!(bridge.panel().active_item(), Some("i1"));
        assert!(bridge.host().commands().is_empty());
    }

    #[test]
    fn test_click_jumps_host() {
        let mut bridge = NavigationBridge::new(host(), ReviewConfig::default());
        bridge.start();
        assert!(bridge.select_item("i2"));
        assert_eq!(
            bridge.host_mut().take_commands(),
            vec![HostCommand::Jump {
                position: 1,
                scope: JumpScope::Item
            }]
        );
    }

    #[test]
    fn test_render_item_drives_answer() {
        let mut bridge = NavigationBridge::new(host(), ReviewConfig::default());
        bridge.start();
        bridge.handle(HostEvent::RenderItem {
            item_id: Some("i2".into()),
            has_response: false,
        });
        assert_eq!(bridge.answer().status(), crate::projection::StatusKind::Incorrect);
        assert_eq!(bridge.answer().score(), "Your Score: 0");
        assert!(bridge.answer().has_no_answer());
        assert_eq!(
            bridge.host().commands().last(),
            Some(&HostCommand::DisplayResponse {
                view: ResponseView::Learner
            })
        );
    }
}
