//! Shortening of long display strings such as URLs.

use std::borrow::Cow;

use active_label_render::TextRange;
use unicode_segmentation::UnicodeSegmentation;

use crate::entity::{Entity, EntityKind};

/// Suffix appended to trimmed text.
pub const TRIM_SUFFIX: &str = "...";

/// Limit `text` to `maximum` user-perceived characters.
///
/// Text at or under the limit is returned unchanged. Longer text keeps its
/// first `maximum` grapheme clusters followed by [`TRIM_SUFFIX`].
pub fn trim_to_length(text: &str, maximum: usize) -> Cow<'_, str> {
    match text.grapheme_indices(true).nth(maximum) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}{TRIM_SUFFIX}", &text[..cut])),
    }
}

/// Shorten every URL entity's span of `text` to `maximum` characters.
///
/// Each URL's characters are replaced by their trimmed form, its range and
/// `trimmed_text` are updated, and the entities after it are shifted by the
/// change in length. Returns the rewritten text, or `None` when nothing was
/// trimmed.
///
/// Entities must be sorted and disjoint and lie within `text`; otherwise the
/// text is left alone and `None` is returned.
pub fn trim_urls(text: &str, entities: &mut [Entity], maximum: usize) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let ordered = entities
        .windows(2)
        .all(|pair| pair[0].range().end() <= pair[1].range().start);
    if !ordered || entities.iter().any(|e| e.range().end() > chars.len()) {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut delta: isize = 0;
    let mut changed = false;

    for entity in entities.iter_mut() {
        let range = entity.range();
        out.extend(&chars[cursor..range.start]);
        cursor = range.end();

        let span: String = chars[range.start..range.end()].iter().collect();
        let shifted = range.offset_by(delta);
        let trimmed = match entity.kind() {
            EntityKind::Url { .. } => trim_to_length(&span, maximum),
            _ => Cow::Borrowed(span.as_str()),
        };

        if let Cow::Owned(trimmed) = trimmed {
            let length = trimmed.chars().count();
            out.push_str(&trimmed);
            delta += length as isize - range.length as isize;
            entity.set_range(TextRange::new(shifted.start, length));
            if let EntityKind::Url { trimmed_text, .. } = entity.kind_mut() {
                *trimmed_text = trimmed;
            }
            changed = true;
        } else {
            out.push_str(&span);
            entity.set_range(shifted);
        }
    }
    out.extend(&chars[cursor..]);

    changed.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_borrowed() {
        assert!(matches!(trim_to_length("short", 5), Cow::Borrowed("short")));
        assert!(matches!(trim_to_length("", 0), Cow::Borrowed("")));
    }

    #[test]
    fn test_long_text_is_cut() {
        assert_eq!(trim_to_length("github.com/rust-lang", 10), "github.com...");
        assert_eq!(trim_to_length("abc", 0), "...");
    }

    #[test]
    fn test_counts_graphemes_not_bytes() {
        // "é" written as e + combining acute is one grapheme.
        let text = "cafe\u{301}/menu";
        assert_eq!(trim_to_length(text, 4), "cafe\u{301}...");
    }

    #[test]
    fn test_trim_urls_shifts_later_entities() {
        let text = "see github.com/rust-lang/rust and #news";
        let mut entities = vec![
            Entity::new(
                TextRange::new(4, 25),
                EntityKind::url("github.com/rust-lang/rust", "https://github.com/rust-lang/rust"),
            ),
            Entity::new(TextRange::new(34, 5), EntityKind::hashtag("#news")),
        ];

        let trimmed = trim_urls(text, &mut entities, 10).unwrap();
        assert_eq!(trimmed, "see github.com... and #news");
        assert_eq!(entities[0].range(), TextRange::new(4, 13));
        assert_eq!(entities[1].range(), TextRange::new(22, 5));
        assert!(matches!(
            entities[0].kind(),
            EntityKind::Url { trimmed_text, display_text, .. }
                if trimmed_text == "github.com..." && display_text == "github.com/rust-lang/rust"
        ));
    }

    #[test]
    fn test_trim_urls_leaves_short_and_unordered_alone() {
        let url = EntityKind::url("a.com", "https://a.com");
        let mut short = vec![Entity::new(TextRange::new(0, 5), url)];
        assert_eq!(trim_urls("a.com", &mut short, 10), None);

        let mut unordered = vec![
            Entity::new(TextRange::new(6, 5), EntityKind::url("b.com", "https://b.com")),
            Entity::new(TextRange::new(0, 5), EntityKind::url("a.com", "https://a.com")),
        ];
        assert_eq!(trim_urls("a.com b.com", &mut unordered, 1), None);
        assert_eq!(unordered[0].range(), TextRange::new(6, 5));
    }
}
