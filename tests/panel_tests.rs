//! Integration tests for the review panel state machine.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use test_review::config::{ConfigPreset, PanelConfig, ReviewConfig, ReviewLayout};
use test_review::error::ValidationErrorKind;
use test_review::events::NamedEvent;
use test_review::model::load_test_map;
use test_review::panel::{PanelBody, PanelEvent, PanelPhase, ReviewPanel};
use test_review::projection::{FilterDescriptor, ReviewFilter};
use test_review::TestMap;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn review_map() -> TestMap {
    load_test_map(&Path::new(FIXTURES_DIR).join("review_map.json")).expect("fixture loads")
}

/// Panel with a recording listener attached.
fn recorded(config: PanelConfig) -> (ReviewPanel, Rc<RefCell<Vec<PanelEvent>>>) {
    let mut panel = ReviewPanel::new(config);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    panel.on(move |event| sink.borrow_mut().push(event.clone()));
    (panel, log)
}

fn take_names(log: &Rc<RefCell<Vec<PanelEvent>>>) -> Vec<&'static str> {
    log.borrow_mut().drain(..).map(|e| e.name()).collect()
}

#[test]
fn test_initial_load_sequence() {
    let (mut panel, log) = recorded(PanelConfig::default());
    panel.start();
    panel.set_data(&review_map());

    assert_eq!(
        take_names(&log),
        ["ready", "datachange", "active", "expand", "update"]
    );
    assert_eq!(panel.phase(), PanelPhase::Filtered);
    assert_eq!(panel.active_item(), Some("i1"));
    assert!(panel.is_expanded("s1"));
    assert!(!panel.is_expanded("s2"));
}

#[test]
fn test_reload_keeps_active_item_when_present() {
    let (mut panel, log) = recorded(PanelConfig::default());
    panel.start();
    panel.set_data(&review_map());
    assert!(panel.select_item("i4"));
    log.borrow_mut().clear();

    panel.set_data(&review_map());
    assert_eq!(take_names(&log), ["datachange", "update"]);
    assert_eq!(panel.active_item(), Some("i4"));
}

#[test]
fn test_reload_falls_back_to_first_item() {
    let (mut panel, log) = recorded(PanelConfig::default());
    panel.start();
    panel.set_data(&review_map());
    assert!(panel.select_item("i6"));
    log.borrow_mut().clear();

    let mut smaller = review_map();
    smaller.parts.retain(|part| part.id.as_deref() == Some("p1"));
    panel.set_data(&smaller);

    assert_eq!(panel.active_item(), Some("i1"));
    assert_eq!(
        log.borrow().iter().find(|e| e.name() == "active"),
        Some(&PanelEvent::Active {
            item_id: "i1".into()
        })
    );
    assert!(!panel.is_expanded("s3"), "sections of removed parts are forgotten");
}

#[test]
fn test_click_reports_test_position() {
    let (mut panel, log) = recorded(PanelConfig::default());
    panel.start();
    panel.set_data(&review_map());
    log.borrow_mut().clear();

    assert!(panel.select_item("i4"));
    assert_eq!(
        log.borrow_mut().drain(..).collect::<Vec<_>>(),
        vec![
            PanelEvent::Active {
                item_id: "i4".into()
            },
            PanelEvent::Expand {
                section_id: "s2".into()
            },
            PanelEvent::ItemChange {
                item_id: "i4".into(),
                position: 3
            },
        ]
    );

    // clicking the active item still asks the host to jump
    assert!(panel.select_item("i4"));
    assert_eq!(take_names(&log), ["itemchange"]);
    assert!(!panel.select_item("missing"));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_filter_keeps_header_score_and_lookup() {
    let (mut panel, log) = recorded(PanelConfig::default());
    panel.start();
    panel.set_data(&review_map());
    log.borrow_mut().clear();

    panel
        .set_active_filter("incorrect")
        .expect("incorrect is configured by default");
    assert_eq!(take_names(&log), ["filterchange", "update"]);
    assert_eq!(panel.current_filter(), ReviewFilter::Incorrect);

    let view = panel.view();
    assert_eq!(view.visible_item_count(), 2);
    assert_eq!(view.header.as_ref().map(|h| h.percent), Some(25));
    assert_eq!(view.footer.as_ref().map(|f| f.text.as_str()), Some("1.5/6"));
    // the active item is filtered out of view but still known
    assert_eq!(panel.active_item(), Some("i1"));
    assert!(panel.item("i1").is_some());
    assert!(panel.select_item("i3"));
}

#[test]
fn test_filter_errors() {
    let (mut panel, log) = recorded(PanelConfig::default());
    panel.start();
    panel.set_data(&review_map());
    log.borrow_mut().clear();

    let err = panel.set_active_filter("pending").expect_err("not configured");
    assert!(matches!(
        err.validation_kind(),
        Some(ValidationErrorKind::FilterNotConfigured(_))
    ));
    let err = panel.set_active_filter("wrong").expect_err("unknown");
    assert!(matches!(
        err.validation_kind(),
        Some(ValidationErrorKind::UnknownFilter(_))
    ));
    assert!(log.borrow().is_empty());
    assert_eq!(panel.active_filter(), Some("all"));
}

#[test]
fn test_filter_cycling() {
    let config = PanelConfig {
        filters: vec![
            ReviewFilter::All.descriptor(),
            ReviewFilter::Incorrect.descriptor(),
            FilterDescriptor::new("pending", "Awaiting score"),
        ],
        ..PanelConfig::default()
    };
    let (mut panel, _log) = recorded(config);
    panel.start();
    panel.set_data(&review_map());

    panel.next_filter();
    assert_eq!(panel.active_filter(), Some("incorrect"));
    panel.next_filter();
    assert_eq!(panel.active_filter(), Some("pending"));
    panel.next_filter();
    assert_eq!(panel.active_filter(), Some("all"));
    panel.prev_filter();
    assert_eq!(panel.active_filter(), Some("pending"));

    let view = panel.view();
    let labels: Vec<&str> = view.filters.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, ["All", "Incorrect", "Awaiting score"]);
    assert!(view.filters[2].active);
}

#[test]
fn test_panel_without_filters_shows_everything() {
    let config = ReviewConfig::from_preset(ConfigPreset::Blind).panel;
    let (mut panel, _log) = recorded(config);
    panel.start();
    panel.set_data(&review_map());

    assert_eq!(panel.active_filter(), None);
    panel.next_filter();
    let view = panel.view();
    assert!(view.filters.is_empty());
    assert!(view.header.is_none());
    assert!(view.footer.is_none());
    assert_eq!(view.visible_item_count(), 6);
}

#[test]
fn test_fizzy_layout_view() {
    let config = PanelConfig {
        layout: ReviewLayout::Fizzy,
        display_section_titles: false,
        display_item_tooltip: true,
        ..PanelConfig::default()
    };
    let (mut panel, log) = recorded(config);
    panel.start();
    panel.set_data(&review_map());
    assert!(!take_names(&log).contains(&"expand"));

    let view = panel.view();
    let PanelBody::Fizzy(sections) = &view.body else {
        panic!("fizzy layout renders a grid");
    };
    assert_eq!(sections.len(), 3);
    assert!(sections.iter().all(|s| s.title.is_none()));
    let numbers: Vec<&str> = sections
        .iter()
        .flat_map(|s| s.buttons.iter())
        .map(|b| b.number.as_str())
        .collect();
    assert_eq!(numbers, ["1", "2", "3", "4", "5", "6"]);
    let first = &sections[0].buttons[0];
    assert!(first.active);
    assert_eq!(first.tooltip.as_deref(), Some("Fractions"));
    assert_eq!(first.aria_label, "1, Correct");
    assert_eq!(panel.toggle_section("s1"), None);
}

#[test]
fn test_accordion_view_marks_active_item() {
    let (mut panel, _log) = recorded(PanelConfig::default());
    panel.start();
    panel.set_data(&review_map());
    panel.select_item("i5");

    let view = panel.view();
    let PanelBody::Accordion(parts) = &view.body else {
        panic!("default layout renders an accordion");
    };
    let s2 = &parts[0].sections[1];
    assert!(s2.expanded);
    assert_eq!(s2.score.as_ref().map(|s| s.text.as_str()), Some("0.5/3"));
    let active: Vec<&str> = parts
        .iter()
        .flat_map(|p| p.sections.iter())
        .flat_map(|s| s.items.iter())
        .filter(|i| i.active)
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(active, ["i5"]);
    assert_eq!(view.active_item_id.as_deref(), Some("i5"));
}

#[test]
fn test_disabled_panel_ignores_clicks() {
    let (mut panel, log) = recorded(PanelConfig::default());
    panel.start();
    panel.set_data(&review_map());
    panel.disable();
    log.borrow_mut().clear();

    assert!(!panel.select_item("i2"));
    assert!(log.borrow().is_empty());
    assert!(panel.view().disabled);

    // host-driven selection still works while disabled
    assert!(panel.set_active_item("i2"));
    panel.enable();
    assert!(panel.select_item("i3"));
}

#[test]
fn test_listener_can_be_removed() {
    let mut panel = ReviewPanel::new(PanelConfig::default());
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = panel.on(move |_| *sink.borrow_mut() += 1);
    panel.start();
    assert_eq!(*count.borrow(), 1);

    assert!(panel.off(id));
    panel.set_data(&review_map());
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_destroy_is_final() {
    let (mut panel, log) = recorded(PanelConfig::default());
    panel.start();
    panel.set_data(&review_map());
    log.borrow_mut().clear();

    panel.destroy();
    panel.destroy();
    assert_eq!(take_names(&log), ["destroy"]);

    panel.set_data(&review_map());
    assert!(!panel.select_item("i1"));
    panel.enable();
    assert!(log.borrow().is_empty());
    assert_eq!(panel.active_item(), None);
    assert_eq!(panel.view().visible_item_count(), 0);
}
