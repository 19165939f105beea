//! Integration tests for the item-answer component.

use test_review::answer::{AnswerEvent, AnswerTab, ItemAnswer, ScoreValue};
use test_review::config::ItemAnswerConfig;
use test_review::error::ValidationErrorKind;
use test_review::events::{EventQueue, NamedEvent};
use test_review::projection::StatusKind;

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
fn test_initial_state() {
    let answer = ItemAnswer::new(ItemAnswerConfig::default());
    assert_eq!(answer.status(), StatusKind::Default);
    assert_eq!(answer.tabs(), [AnswerTab::Answer]);
    assert_eq!(answer.active_tab(), AnswerTab::Answer);
    assert_eq!(answer.score(), "");
    assert!(!answer.has_no_answer());
}

#[test]
fn test_status_change_sequence() {
    let (mut answer, queue) = started(ItemAnswerConfig::default());

    answer.set_status("incorrect", true).expect("known status");
    assert_eq!(
        queue.drain(),
        vec![
            AnswerEvent::StatusChange {
                status: StatusKind::Incorrect
            },
            AnswerEvent::HasCorrectResponseChange {
                has_correct_response: true
            },
            AnswerEvent::TabChange {
                tab: AnswerTab::Answer
            },
        ]
    );
    assert_eq!(answer.tabs(), [AnswerTab::Answer, AnswerTab::Correct]);

    // same values again: only the tab notification
    answer.set_status("incorrect", true).expect("known status");
    assert_eq!(names(&queue), ["tabchange"]);

    // flag unchanged, status changed
    answer.set_status("partial", true).expect("known status");
    assert_eq!(names(&queue), ["statuschange", "tabchange"]);
}

#[test]
fn test_unknown_status_is_rejected() {
    let (mut answer, queue) = started(ItemAnswerConfig::default());
    let err = answer.set_status("half-right", true).expect_err("unknown");
    assert!(matches!(
        err.validation_kind(),
        Some(ValidationErrorKind::UnknownStatus(s)) if s == "half-right"
    ));
    assert!(queue.is_empty());
    assert_eq!(answer.status(), StatusKind::Default);
}

#[test]
fn test_correct_tab_follows_flag_and_config() {
    let (mut answer, queue) = started(ItemAnswerConfig::default());
    answer.set_status_kind(StatusKind::Correct, true);
    assert!(answer.select_tab(AnswerTab::Correct));
    queue.drain();

    // tab disappears: active tab falls back to the learner's response
    answer.set_status_kind(StatusKind::Informational, false);
    assert_eq!(answer.tabs(), [AnswerTab::Answer]);
    assert_eq!(answer.active_tab(), AnswerTab::Answer);
    assert_eq!(
        queue.drain().last(),
        Some(&AnswerEvent::TabChange {
            tab: AnswerTab::Answer
        })
    );
    assert!(!answer.select_tab(AnswerTab::Correct));

    let hidden = ItemAnswerConfig {
        show_correct: false,
        ..ItemAnswerConfig::default()
    };
    let (mut answer, _queue) = started(hidden);
    answer.set_status_kind(StatusKind::Incorrect, true);
    assert!(answer.has_correct_response_tab());
    assert_eq!(answer.tabs(), [AnswerTab::Answer]);
}

#[test]
fn test_active_tab_survives_status_change() {
    let (mut answer, _queue) = started(ItemAnswerConfig::default());
    answer.set_status_kind(StatusKind::Incorrect, true);
    assert!(answer.select_tab(AnswerTab::Correct));
    assert!(!answer.select_tab(AnswerTab::Correct), "already active");

    answer.set_status_kind(StatusKind::Partial, true);
    assert_eq!(answer.active_tab(), AnswerTab::Correct);
}

#[test]
fn test_score_rendering() {
    let (mut answer, _queue) = started(ItemAnswerConfig::default());

    answer.set_score(Some(ScoreValue::from(0.0)));
    assert_eq!(answer.score(), "Your Score: 0");
    answer.set_score(Some(ScoreValue::from(1.5)));
    assert_eq!(answer.score(), "Your Score: 1.5");
    answer.set_score(Some("2 / 3".into()));
    assert_eq!(answer.score(), "Your Score: 2 / 3");
    answer.set_score(Some("".into()));
    assert_eq!(answer.score(), "");
    answer.set_score(None);
    assert_eq!(answer.score(), "");
}

#[test]
fn test_no_answer_flag_leaves_tabs_alone() {
    let (mut answer, queue) = started(ItemAnswerConfig::default());
    answer.set_status_kind(StatusKind::Incorrect, true);
    queue.drain();

    answer.set_has_no_answer(true);
    assert!(queue.is_empty());
    let view = answer.view();
    assert_eq!(view.no_answer_text.as_deref(), Some("No response"));
    assert_eq!(view.tabs.len(), 2);
    assert_eq!(view.tabs[1].label, "Correct response");
    assert_eq!(view.status_label, "Incorrect");
}

#[test]
fn test_disabled_blocks_tab_switch() {
    let (mut answer, queue) = started(ItemAnswerConfig::default());
    answer.set_status_kind(StatusKind::Incorrect, true);
    answer.disable();
    answer.disable();
    queue.drain();

    assert!(!answer.select_tab(AnswerTab::Correct));
    assert!(answer.view().tabs.iter().all(|t| t.disabled));
    answer.enable();
    assert_eq!(names(&queue), ["enable"]);
    assert!(answer.select_tab(AnswerTab::Correct));
}

#[test]
fn test_silent_before_start_and_after_destroy() {
    let mut answer = ItemAnswer::new(ItemAnswerConfig::default());
    let (queue, _) = EventQueue::attach(answer.events_mut());
    answer.set_status_kind(StatusKind::Correct, true);
    assert!(queue.is_empty());
    assert_eq!(answer.status(), StatusKind::Correct);

    answer.start();
    answer.destroy();
    assert_eq!(names(&queue), ["ready", "destroy"]);
    assert!(answer.is_destroyed());

    answer.set_status_kind(StatusKind::Incorrect, false);
    assert!(!answer.select_tab(AnswerTab::Answer));
    assert_eq!(answer.status(), StatusKind::Correct);
    assert!(queue.is_empty());
}
