//! ItemAnswer: status, score and response tabs of the current item.

use super::types::{AnswerEvent, AnswerTab, AnswerView, ScoreValue, TabView};
use crate::config::ItemAnswerConfig;
use crate::error::Result;
use crate::events::{EventEmitter, ListenerId};
use crate::projection::StatusKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Started,
    Destroyed,
}

/// Item answer state machine.
///
/// States are the [`StatusKind`] values; only [`ItemAnswer::set_status`]
/// moves between them. The tab list is rebuilt whenever the status or the
/// correct-response flag changes.
#[derive(Debug)]
pub struct ItemAnswer {
    config: ItemAnswerConfig,
    lifecycle: Lifecycle,
    status: StatusKind,
    has_correct_response_tab: bool,
    tabs: Vec<AnswerTab>,
    active_tab: AnswerTab,
    score: String,
    has_no_answer: bool,
    disabled: bool,
    events: EventEmitter<AnswerEvent>,
}

impl ItemAnswer {
    #[must_use]
    pub fn new(config: ItemAnswerConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Created,
            status: StatusKind::Default,
            has_correct_response_tab: false,
            tabs: vec![AnswerTab::Answer],
            active_tab: AnswerTab::Answer,
            score: String::new(),
            has_no_answer: false,
            disabled: false,
            events: EventEmitter::new(),
        }
    }

    pub fn on(&mut self, listener: impl FnMut(&AnswerEvent) + 'static) -> ListenerId {
        self.events.on(listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    pub fn events_mut(&mut self) -> &mut EventEmitter<AnswerEvent> {
        &mut self.events
    }

    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Started;
        self.emit(AnswerEvent::Ready);
    }

    /// Set the status from its wire name.
    ///
    /// Unknown names are rejected with a validation error and leave the
    /// state untouched.
    pub fn set_status(&mut self, status: &str, has_correct_response_tab: bool) -> Result<()> {
        let kind: StatusKind = status.parse()?;
        self.set_status_kind(kind, has_correct_response_tab);
        Ok(())
    }

    /// Set the status.
    ///
    /// Fires `statuschange` and `hascorrectresponsechange` for whichever of
    /// the two values changed, then always one `tabchange` with the active tab.
    pub fn set_status_kind(&mut self, status: StatusKind, has_correct_response_tab: bool) {
        if self.ignored_after_destroy("set_status") {
            return;
        }
        let status_changed = status != self.status;
        let flag_changed = has_correct_response_tab != self.has_correct_response_tab;

        if status_changed {
            self.status = status;
            tracing::debug!(status = %status, "Item status changed");
            self.emit(AnswerEvent::StatusChange { status });
        }
        if flag_changed {
            self.has_correct_response_tab = has_correct_response_tab;
            self.emit(AnswerEvent::HasCorrectResponseChange {
                has_correct_response: has_correct_response_tab,
            });
        }
        if status_changed || flag_changed {
            self.rebuild_tabs();
        }
        self.emit(AnswerEvent::TabChange {
            tab: self.active_tab,
        });
    }

    /// Switch to a visible tab. Returns false when the tab is hidden, already
    /// active, or the component is disabled.
    pub fn select_tab(&mut self, tab: AnswerTab) -> bool {
        if self.ignored_after_destroy("select_tab") || self.disabled {
            return false;
        }
        if tab == self.active_tab || !self.tabs.contains(&tab) {
            return false;
        }
        self.active_tab = tab;
        self.emit(AnswerEvent::TabChange { tab });
        true
    }

    /// Set the score line. `Some(0)` renders, `None` and `""` render nothing.
    pub fn set_score(&mut self, score: Option<ScoreValue>) {
        if self.ignored_after_destroy("set_score") {
            return;
        }
        self.score = score.map_or_else(String::new, |value| value.render(&self.config.score_text));
    }

    /// Toggle the "no response" text. Does not touch status or tabs.
    pub fn set_has_no_answer(&mut self, has_no_answer: bool) {
        if self.ignored_after_destroy("set_has_no_answer") {
            return;
        }
        self.has_no_answer = has_no_answer;
    }

    pub fn enable(&mut self) {
        if self.ignored_after_destroy("enable") || !self.disabled {
            return;
        }
        self.disabled = false;
        self.emit(AnswerEvent::Enable);
    }

    pub fn disable(&mut self) {
        if self.ignored_after_destroy("disable") || self.disabled {
            return;
        }
        self.disabled = true;
        self.emit(AnswerEvent::Disable);
    }

    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.emit(AnswerEvent::Destroy);
        self.events.clear();
        self.lifecycle = Lifecycle::Destroyed;
    }

    #[must_use]
    pub const fn status(&self) -> StatusKind {
        self.status
    }

    #[must_use]
    pub const fn has_correct_response_tab(&self) -> bool {
        self.has_correct_response_tab
    }

    #[must_use]
    pub fn tabs(&self) -> &[AnswerTab] {
        &self.tabs
    }

    #[must_use]
    pub const fn active_tab(&self) -> AnswerTab {
        self.active_tab
    }

    /// Rendered score line.
    #[must_use]
    pub fn score(&self) -> &str {
        &self.score
    }

    #[must_use]
    pub const fn has_no_answer(&self) -> bool {
        self.has_no_answer
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    #[must_use]
    pub fn view(&self) -> AnswerView {
        AnswerView {
            status: self.status,
            status_label: self.status.label(),
            icon: self.status.icon(),
            has_correct_response_tab: self.has_correct_response_tab,
            active_tab: self.active_tab,
            tabs: self
                .tabs
                .iter()
                .map(|&tab| TabView {
                    tab,
                    label: match tab {
                        AnswerTab::Answer => self.config.answer_tab_label.clone(),
                        AnswerTab::Correct => self.config.correct_tab_label.clone(),
                    },
                    active: tab == self.active_tab,
                    disabled: self.disabled,
                })
                .collect(),
            score: self.score.clone(),
            no_answer_text: self
                .has_no_answer
                .then(|| self.config.no_answer_text.clone()),
            disabled: self.disabled,
        }
    }

    fn rebuild_tabs(&mut self) {
        let mut tabs = vec![AnswerTab::Answer];
        if self.config.show_correct && self.has_correct_response_tab {
            tabs.push(AnswerTab::Correct);
        }
        if !tabs.contains(&self.active_tab) {
            self.active_tab = AnswerTab::Answer;
        }
        self.tabs = tabs;
    }

    fn ignored_after_destroy(&self, operation: &str) -> bool {
        let destroyed = self.lifecycle == Lifecycle::Destroyed;
        if destroyed {
            tracing::warn!(operation, "Item answer operation after destroy ignored");
        }
        destroyed
    }

    fn emit(&mut self, event: AnswerEvent) {
        if self.lifecycle != Lifecycle::Started {
            return;
        }
        self.events.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventQueue, NamedEvent};

    fn started(config: ItemAnswerConfig) -> (ItemAnswer, EventQueue<AnswerEvent>) {
        let mut answer = ItemAnswer::new(config);
        let (queue, _) = EventQueue::attach(answer.events_mut());
        answer.start();
        assert_eq!(queue.drain(), vec![AnswerEvent::Ready]);
        (answer, queue)
    }

    fn names(queue: &EventQueue<AnswerEvent>) -> Vec<&'static str> {
        queue.drain().iter().map(NamedEvent::name).collect()
    }

    #[test]
    fn test_status_change_order() {
        let (mut answer, queue) = started(ItemAnswerConfig::default());
        answer.set_status("correct", true).expect("known status");
        assert_eq!(
            names(&queue),
            ["statuschange", "hascorrectresponsechange", "tabchange"]
        );
        assert_eq!(answer.tabs(), [AnswerTab::Answer, AnswerTab::Correct]);
    }

    #[test]
    fn test_tabchange_on_every_call() {
        let (mut answer, queue) = started(ItemAnswerConfig::default());
        answer.set_status("correct", true).expect("known status");
        queue.drain();
        answer.set_status("correct", true).expect("known status");
        assert_eq!(
            queue.drain(),
            vec![AnswerEvent::TabChange {
                tab: AnswerTab::Answer
            }]
        );
    }

    #[test]
    fn test_flag_change_alone_rebuilds_tabs() {
        let (mut answer, queue) = started(ItemAnswerConfig::default());
        answer.set_status("incorrect", false).expect("known status");
        assert_eq!(answer.tabs(), [AnswerTab::Answer]);
        queue.drain();

        answer.set_status("incorrect", true).expect("known status");
        assert_eq!(names(&queue), ["hascorrectresponsechange", "tabchange"]);
        assert_eq!(answer.tabs(), [AnswerTab::Answer, AnswerTab::Correct]);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let (mut answer, queue) = started(ItemAnswerConfig::default());
        let err = answer.set_status("flagged", true).expect_err("unknown status");
        assert!(err.validation_kind().is_some());
        assert!(queue.is_empty());
        assert_eq!(answer.status(), StatusKind::Default);
    }

    #[test]
    fn test_show_correct_gates_tab() {
        let config = ItemAnswerConfig {
            show_correct: false,
            ..ItemAnswerConfig::default()
        };
        let (mut answer, _queue) = started(config);
        answer.set_status("partial", true).expect("known status");
        assert_eq!(answer.tabs(), [AnswerTab::Answer]);
        assert!(!answer.select_tab(AnswerTab::Correct));
    }

    #[test]
    fn test_active_tab_reset_when_hidden() {
        let (mut answer, queue) = started(ItemAnswerConfig::default());
        answer.set_status("correct", true).expect("known status");
        assert!(answer.select_tab(AnswerTab::Correct));
        queue.drain();

        answer.set_status("informational", false).expect("known status");
        assert_eq!(answer.active_tab(), AnswerTab::Answer);
        assert_eq!(
            queue.drain().last(),
            Some(&AnswerEvent::TabChange {
                tab: AnswerTab::Answer
            })
        );
    }

    #[test]
    fn test_active_tab_kept_when_still_visible() {
        let (mut answer, _queue) = started(ItemAnswerConfig::default());
        answer.set_status("correct", true).expect("known status");
        answer.select_tab(AnswerTab::Correct);
        answer.set_status("partial", true).expect("known status");
        assert_eq!(answer.active_tab(), AnswerTab::Correct);
    }

    #[test]
    fn test_score_and_no_answer() {
        let (mut answer, _queue) = started(ItemAnswerConfig::default());
        answer.set_score(Some(ScoreValue::Number(0.0)));
        assert_eq!(answer.score(), "Your Score: 0");
        answer.set_score(Some(ScoreValue::from("")));
        assert_eq!(answer.score(), "");
        answer.set_score(None);
        assert_eq!(answer.score(), "");

        answer.set_has_no_answer(true);
        assert_eq!(answer.view().no_answer_text.as_deref(), Some("No response"));
        assert_eq!(answer.status(), StatusKind::Default);
    }

    #[test]
    fn test_disable_is_uniform() {
        let (mut answer, queue) = started(ItemAnswerConfig::default());
        answer.set_status("correct", true).expect("known status");
        answer.disable();
        let view = answer.view();
        assert!(view.tabs.iter().all(|tab| tab.disabled));
        assert!(!answer.select_tab(AnswerTab::Correct));
        answer.enable();
        assert!(answer.view().tabs.iter().all(|tab| !tab.disabled));
        assert_eq!(
            names(&queue),
            ["statuschange", "hascorrectresponsechange", "tabchange", "disable", "enable"]
        );
    }

    #[test]
    fn test_destroy_guard() {
        let (mut answer, queue) = started(ItemAnswerConfig::default());
        answer.destroy();
        assert_eq!(names(&queue), ["destroy"]);
        answer.set_status("correct", true).expect("ignored, not rejected");
        assert_eq!(answer.status(), StatusKind::Default);
        assert!(answer.is_destroyed());
    }
}
