//! Integration tests for loading a TOML configuration and applying it.

use std::io::Write;
use std::time::{Duration, Instant};

use active_label::prelude::*;
use active_label::{FixedAdvanceLayout, LabelError};

const CONFIG: &str = r##"
revert_delay_ms = 100
minimum_line_height = 30.0

[mention]
normal = "#FF0000"
selected = "#000000"

[url]
normal = "#00FF00"

[highlight_font]
family = "Helvetica Neue"
size = 18.0
"##;

fn label() -> ActiveLabel {
    let mut label = ActiveLabel::with_engine(
        FixedAdvanceLayout::new(10.0, 20.0),
        "mail a@b.io or @bob",
    );
    label.set_entities(vec![
        Entity::new(TextRange::new(5, 6), EntityKind::email("a@b.io")),
        Entity::new(TextRange::new(15, 4), EntityKind::mention("@bob")),
    ]);
    label
}

#[test]
fn file_configuration_drives_styling_and_timing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();

    let config = ActiveLabelConfig::from_toml_file(file.path()).unwrap();
    let mut label = label();
    label.apply_config(&config);

    let attrs = |label: &ActiveLabel, i: usize| {
        label.styled_text().attributes_at(i).unwrap().0.clone()
    };

    // Emails share the URL colors when no email table is given.
    assert_eq!(attrs(&label, 6).color, Color::GREEN);
    assert_eq!(attrs(&label, 16).color, Color::RED);
    assert_eq!(attrs(&label, 16).font, Font::new("Helvetica Neue", 18.0));
    assert_eq!(attrs(&label, 0).font, Font::default());
    assert_eq!(attrs(&label, 0).paragraph.minimum_line_height, 30.0);

    label.draw(Rect::new(0.0, 0.0, 400.0, 30.0));
    let start = Instant::now();
    label.handle_touch(TouchPhase::Started, Point::new(165.0, 15.0), start);
    label.handle_touch(TouchPhase::Ended, Point::new(165.0, 15.0), start);
    assert_eq!(attrs(&label, 16).color, Color::BLACK);

    label.process_timers(start + Duration::from_millis(100));
    assert_eq!(attrs(&label, 16).color, Color::RED);
}

#[test]
fn malformed_configuration_is_reported() {
    let err = ActiveLabelConfig::from_toml_str("revert_delay_ms = \"soon\"").unwrap_err();
    assert!(matches!(err, LabelError::Config { .. }));
    assert!(err.to_string().starts_with("Invalid configuration"));
}
