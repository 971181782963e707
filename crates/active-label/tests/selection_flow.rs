//! Integration tests for tapping entities on a laid-out label.

use std::sync::Arc;
use std::time::{Duration, Instant};

use active_label::prelude::*;
use active_label::{FixedAdvanceLayout, SelectionState};
use parking_lot::Mutex;

const TEXT: &str = "hello @bob check #news";

/// Character `i` of the first line is centered at x = 10 * i + 5.
fn at(index: usize) -> Point {
    Point::new(index as f32 * 10.0 + 5.0, 10.0)
}

fn setup() -> (ActiveLabel, Arc<Mutex<Vec<String>>>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("active_label=trace")
        .with_test_writer()
        .try_init();

    let mut label = ActiveLabel::with_engine(FixedAdvanceLayout::new(10.0, 20.0), TEXT);
    label.set_style_config(StyleConfig {
        mention: EntityColors::new(Color::BLUE).with_selected(Color::RED),
        hashtag: EntityColors::new(Color::GREEN).with_selected(Color::GRAY),
        ..StyleConfig::default()
    });
    label.set_entities(vec![
        Entity::new(TextRange::new(6, 4), EntityKind::mention("@bob")),
        Entity::new(TextRange::new(17, 5), EntityKind::hashtag("#news")),
    ]);
    label.draw(Rect::new(0.0, 0.0, 400.0, 20.0));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    label
        .entity_selected
        .connect(move |entity: &Entity| sink.lock().push(entity.primary_text().to_string()));
    (label, seen)
}

fn color_at(label: &ActiveLabel, index: usize) -> Color {
    label.styled_text().attributes_at(index).unwrap().0.color
}

#[test]
fn tap_notifies_once_and_reverts_after_delay() {
    let (mut label, seen) = setup();
    let start = Instant::now();

    assert!(label.handle_touch(TouchPhase::Started, at(8), start));
    assert!(label.handle_touch(TouchPhase::Moved, at(7), start + Duration::from_millis(20)));
    assert!(label.handle_touch(TouchPhase::Ended, at(7), start + Duration::from_millis(50)));
    assert_eq!(*seen.lock(), vec!["@bob".to_string()]);

    let released = start + Duration::from_millis(50);
    assert_eq!(label.time_until_next_timer(released), Some(Duration::from_millis(250)));

    label.process_timers(released + Duration::from_millis(100));
    assert_eq!(color_at(&label, 8), Color::RED);

    label.process_timers(released + Duration::from_millis(250));
    assert_eq!(color_at(&label, 8), Color::BLUE);
    assert_eq!(*label.selection_state(), SelectionState::Idle);
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn fast_second_tap_is_not_cleared_by_first_revert() {
    let (mut label, seen) = setup();
    let start = Instant::now();

    label.handle_touch(TouchPhase::Started, at(8), start);
    label.handle_touch(TouchPhase::Ended, at(8), start);

    let second = start + Duration::from_millis(100);
    label.handle_touch(TouchPhase::Started, at(19), second);
    assert_eq!(color_at(&label, 8), Color::BLUE);
    assert_eq!(color_at(&label, 19), Color::GRAY);
    label.handle_touch(TouchPhase::Ended, at(19), second);

    // The first tap's deadline passes; #news must stay selected.
    assert_eq!(label.process_timers(start + Duration::from_millis(250)), 0);
    assert_eq!(color_at(&label, 19), Color::GRAY);
    assert_eq!(label.selected_entity().map(Entity::primary_text), Some("#news"));

    assert_eq!(label.process_timers(second + Duration::from_millis(250)), 1);
    assert_eq!(color_at(&label, 19), Color::GREEN);
    assert_eq!(*seen.lock(), vec!["@bob".to_string(), "#news".to_string()]);
}

#[test]
fn holding_the_same_entity_again_cancels_its_revert() {
    let (mut label, seen) = setup();
    let start = Instant::now();

    label.handle_touch(TouchPhase::Started, at(8), start);
    label.handle_touch(TouchPhase::Ended, at(8), start);
    label.handle_touch(TouchPhase::Started, at(8), start + Duration::from_millis(100));

    assert_eq!(label.time_until_next_timer(start + Duration::from_millis(100)), None);
    label.process_timers(start + Duration::from_secs(5));
    assert_eq!(color_at(&label, 8), Color::RED);

    label.handle_touch(TouchPhase::Ended, at(8), start + Duration::from_secs(5));
    assert_eq!(seen.lock().len(), 2);
}

#[test]
fn cancel_restores_style_without_notifying() {
    let (mut label, seen) = setup();
    let now = Instant::now();

    label.handle_touch(TouchPhase::Started, at(19), now);
    assert_eq!(color_at(&label, 19), Color::GRAY);

    assert!(!label.handle_touch(TouchPhase::Cancelled, at(19), now));
    assert_eq!(color_at(&label, 19), Color::GREEN);
    assert!(seen.lock().is_empty());
}

#[test]
fn sliding_off_an_entity_drops_the_selection() {
    let (mut label, seen) = setup();
    let now = Instant::now();

    label.handle_touch(TouchPhase::Started, at(8), now);
    assert!(!label.handle_touch(TouchPhase::Moved, at(13), now));
    assert_eq!(color_at(&label, 8), Color::BLUE);
    assert!(!label.handle_touch(TouchPhase::Ended, at(13), now));
    assert!(seen.lock().is_empty());
}

#[test]
fn tap_just_past_an_entity_still_hits_it() {
    let (mut label, seen) = setup();
    let now = Instant::now();

    // Index 10 is the space after "@bob".
    assert!(label.handle_touch(TouchPhase::Started, at(10), now));
    label.handle_touch(TouchPhase::Ended, at(10), now);
    assert_eq!(*seen.lock(), vec!["@bob".to_string()]);

    assert!(!label.handle_touch(TouchPhase::Started, at(11), now));
}

#[test]
fn clearing_entities_clears_lookup_and_selection() {
    let (mut label, _) = setup();
    label.handle_touch(TouchPhase::Started, at(8), Instant::now());

    label.set_entities(Vec::new());
    assert!(label.selected_entity().is_none());
    assert!((0..TEXT.len() + 2).all(|i| label.entity_at_index(i).is_none()));
    assert_eq!(color_at(&label, 8), Color::BLACK);
}

#[test]
fn mouse_click_behaves_like_a_tap() {
    let (mut label, seen) = setup();
    let now = Instant::now();

    assert!(label.handle_mouse_press(MouseButton::Left, at(18), now));
    assert!(label.handle_mouse_release(MouseButton::Left, at(18), now));
    assert_eq!(*seen.lock(), vec!["#news".to_string()]);
}

#[test]
fn detector_installs_entities_with_text() {
    let (mut label, _) = setup();

    let mentions = |text: &str| -> Vec<Entity> {
        let mut found = Vec::new();
        let mut offset = 0;
        for word in text.split(' ') {
            let len = word.chars().count();
            if word.starts_with('@') {
                found.push(Entity::new(TextRange::new(offset, len), EntityKind::mention(word)));
            }
            offset += len + 1;
        }
        found
    };

    label.set_text_with_detector("ping @ann and @joe", &mentions);
    let texts: Vec<_> = label.entities().iter().map(Entity::primary_text).collect();
    assert_eq!(texts, vec!["@ann", "@joe"]);
    assert_eq!(label.entity_at_index(15).map(Entity::primary_text), Some("@joe"));
}
