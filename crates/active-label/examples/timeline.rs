//! Timeline example: a few posts with entities, tapped by a scripted user.
//!
//! Run with: cargo run -p active-label --example timeline

use std::time::{Duration, Instant};

use active_label::prelude::*;
use active_label::{FixedAdvanceLayout, StyledText};

/// A whitespace tokenizer good enough for the demo posts.
fn detect(text: &str) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut offset = 0;
    for word in text.split(' ') {
        let len = word.chars().count();
        let range = TextRange::new(offset, len);
        offset += len + 1;

        let kind = if word.starts_with('@') && len > 1 {
            EntityKind::mention(word)
        } else if word.starts_with('#') && len > 1 {
            EntityKind::hashtag(word)
        } else if word.starts_with("http://") || word.starts_with("https://") {
            EntityKind::url(word, word)
        } else if word.contains('@') && word.contains('.') {
            EntityKind::email(word)
        } else {
            continue;
        };
        entities.push(Entity::new(range, kind));
    }
    entities
}

fn describe(styled: &StyledText) -> String {
    let chars: Vec<char> = styled.text().chars().collect();
    styled
        .runs()
        .iter()
        .map(|run| {
            let text: String = chars[run.range.start..run.range.end()].iter().collect();
            format!("[{}]{text:?}", run.attributes.color)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = ActiveLabelConfig::from_toml_str(
        r##"
        url_maximum_length = 20

        [mention]
        normal = "#1DA1F2"
        selected = "#0B5C8E"

        [hashtag]
        normal = "#17BF63"
        selected = "#0E7A3E"

        [url]
        normal = "#794BC4"
        "##,
    );
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("bad configuration: {err}");
            return;
        }
    };

    let posts = [
        "shipping the new release today #rustlang",
        "thanks @ferris for the review, notes at https://example.com/notes/2024/release-review",
        "questions? write to team@example.com or ping @crab",
    ];

    let mut label = ActiveLabel::with_engine(FixedAdvanceLayout::new(8.0, 20.0), "");
    label.apply_config(&config);
    label.entity_selected.connect(|entity: &Entity| {
        println!("  -> tapped {:?}: {}", entity.kind().category(), entity.primary_text());
    });

    let mut clock = Instant::now();
    for post in posts {
        label.set_text_with_detector(post, &detect);
        let origin = label.draw(Rect::new(0.0, 0.0, 320.0, 80.0));
        println!("{}", label.text());
        println!("  origin {origin:?}, {} entities", label.entities().len());
        println!("  {}", describe(label.styled_text()));

        // Tap the middle of every entity in turn.
        let targets: Vec<TextRange> = label.entities().iter().map(Entity::range).collect();
        for range in targets {
            let index = range.start + range.length / 2;
            let point = label.with_layout(|_, layout| {
                layout
                    .lines()
                    .iter()
                    .find(|line| line.range.contains(index))
                    .map(|line| {
                        Point::new(
                            line.rect.left() + (index - line.range.start) as f32 * 8.0 + 4.0,
                            line.rect.top() + 10.0 + label.height_correction(),
                        )
                    })
            });
            let Some(point) = point else {
                continue;
            };

            label.handle_touch(TouchPhase::Started, point, clock);
            label.handle_touch(TouchPhase::Ended, point, clock);
            println!("  pressed: {}", describe(label.styled_text()));

            while let Some(wait) = label.time_until_next_timer(clock) {
                clock += wait;
                label.process_timers(clock);
            }
            clock += Duration::from_millis(50);
        }
    }
}
