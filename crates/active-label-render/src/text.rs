//! Styled text: a string with attribute runs over character ranges.
//!
//! Ranges in this module are expressed in characters (Unicode scalar values),
//! not bytes. [`TextRange::to_byte_range`] converts when slicing is needed.
//!
//! # Example
//!
//! ```
//! use active_label_render::{Color, StyledText, TextAttributes, TextRange};
//!
//! let mut styled = StyledText::new("hello @bob", TextAttributes::default());
//! styled.update_attributes(TextRange::new(6, 4), |attrs| attrs.color = Color::BLUE);
//!
//! let (attrs, effective) = styled.attributes_at(7).unwrap();
//! assert_eq!(attrs.color, Color::BLUE);
//! assert_eq!(effective, TextRange::new(6, 4));
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Default font family used when none is specified.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 17.0;

/// A half-open character interval `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    /// Index of the first character.
    pub start: usize,
    /// Number of characters covered.
    pub length: usize,
}

impl TextRange {
    /// Create a range from a start index and a length.
    #[inline]
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Create a range from start and end indices (`end` exclusive).
    #[inline]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self::new(start, end.saturating_sub(start))
    }

    /// One past the last covered index, saturating at `usize::MAX`.
    #[inline]
    pub const fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check whether `index` lies inside the half-open interval.
    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    /// Check whether `index` lies inside the interval or exactly at its end.
    ///
    /// Entity hit testing uses this one-past-the-end tolerance so a tap on the
    /// glyph boundary right after an entity still resolves to it.
    #[inline]
    pub const fn contains_inclusive_end(&self, index: usize) -> bool {
        index >= self.start && index <= self.end()
    }

    /// Check whether two ranges share at least one character.
    #[inline]
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// The characters covered by both ranges, if any.
    pub fn intersection(&self, other: &TextRange) -> Option<TextRange> {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        (start < end).then(|| TextRange::from_bounds(start, end))
    }

    /// Clamp this range to a text of `len` characters.
    ///
    /// Returns `None` if nothing of a non-empty range survives.
    pub fn clamp_to(&self, len: usize) -> Option<TextRange> {
        if self.start > len {
            return None;
        }
        let clamped = TextRange::from_bounds(self.start, self.end().min(len));
        if clamped.is_empty() && !self.is_empty() {
            None
        } else {
            Some(clamped)
        }
    }

    /// Shift the range by a signed number of characters, saturating at zero.
    pub fn offset_by(&self, delta: isize) -> TextRange {
        TextRange::new(self.start.saturating_add_signed(delta), self.length)
    }

    /// Convert to a byte range within `text`.
    ///
    /// Indices past the end of `text` map to `text.len()`.
    pub fn to_byte_range(&self, text: &str) -> Range<usize> {
        let byte_at = |char_index: usize| {
            text.char_indices()
                .nth(char_index)
                .map_or(text.len(), |(byte, _)| byte)
        };
        byte_at(self.start)..byte_at(self.end())
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self::from_bounds(range.start, range.end)
    }
}

/// A font description: family name and point size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Family name, e.g. `"sans-serif"` or `"Helvetica Neue"`.
    pub family: String,
    /// Size in points.
    pub size: f32,
}

impl Font {
    /// Create a font from a family name and size.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// The default system font at the given size.
    pub fn system(size: f32) -> Self {
        Self::new(DEFAULT_FONT_FAMILY, size)
    }

    /// Return a copy with a different size.
    pub fn with_size(&self, size: f32) -> Self {
        Self::new(self.family.clone(), size)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(DEFAULT_FONT_SIZE)
    }
}

/// Horizontal alignment of lines within the layout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How lines are broken when text exceeds the container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineBreakMode {
    /// Break at word boundaries, falling back to characters for long words.
    #[default]
    WordWrap,
    /// Break at any character.
    CharWrap,
    /// Never wrap; only explicit newlines start a new line.
    Clip,
}

/// Paragraph-level layout attributes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParagraphStyle {
    /// Line alignment.
    pub alignment: HorizontalAlign,
    /// Line breaking policy.
    pub line_break_mode: LineBreakMode,
    /// Extra space between lines.
    pub line_spacing: f32,
    /// Lower bound for each line's height.
    pub minimum_line_height: f32,
}

/// Attributes applied to one run of characters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextAttributes {
    pub font: Font,
    pub color: Color,
    pub paragraph: ParagraphStyle,
}

impl TextAttributes {
    /// Create attributes with a font and color and a default paragraph style.
    pub fn new(font: Font, color: Color) -> Self {
        Self {
            font,
            color,
            paragraph: ParagraphStyle::default(),
        }
    }
}

/// A maximal range of characters sharing the same attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub range: TextRange,
    pub attributes: TextAttributes,
}

/// Text with attribute runs.
///
/// Runs are sorted, contiguous and together cover every character of the
/// text. Empty text has no runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    text: String,
    char_len: usize,
    runs: Vec<TextRun>,
}

impl StyledText {
    /// Create styled text with a single run covering the whole string.
    pub fn new(text: impl Into<String>, attributes: TextAttributes) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        let runs = if char_len == 0 {
            Vec::new()
        } else {
            vec![TextRun {
                range: TextRange::new(0, char_len),
                attributes,
            }]
        };
        Self {
            text,
            char_len,
            runs,
        }
    }

    /// Create empty styled text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The underlying string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// The attribute runs in text order.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// The attributes at `index` together with the run's effective range.
    pub fn attributes_at(&self, index: usize) -> Option<(&TextAttributes, TextRange)> {
        let position = self.run_index_at(index)?;
        let run = &self.runs[position];
        Some((&run.attributes, run.range))
    }

    /// Replace the attributes over `range`.
    pub fn set_attributes(&mut self, range: TextRange, attributes: &TextAttributes) {
        self.update_attributes(range, |attrs| *attrs = attributes.clone());
    }

    /// Modify the attributes of every character in `range`.
    ///
    /// The part of `range` outside the text is ignored. Runs are split at the
    /// range boundaries and adjacent runs left identical are merged.
    pub fn update_attributes<F>(&mut self, range: TextRange, mut update: F)
    where
        F: FnMut(&mut TextAttributes),
    {
        let Some(range) = range.intersection(&TextRange::new(0, self.char_len)) else {
            return;
        };
        self.split_at(range.start);
        self.split_at(range.end());

        for run in &mut self.runs {
            if run.range.start >= range.start && run.range.end() <= range.end() {
                update(&mut run.attributes);
            }
        }
        self.coalesce();
    }

    fn run_index_at(&self, index: usize) -> Option<usize> {
        self.runs
            .binary_search_by(|run| {
                if run.range.end() <= index {
                    std::cmp::Ordering::Less
                } else if run.range.start > index {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()
    }

    /// Ensure a run boundary exists at `index`.
    fn split_at(&mut self, index: usize) {
        let Some(position) = self.run_index_at(index) else {
            return;
        };
        let run = &mut self.runs[position];
        if run.range.start == index {
            return;
        }
        let tail = TextRun {
            range: TextRange::from_bounds(index, run.range.end()),
            attributes: run.attributes.clone(),
        };
        run.range = TextRange::from_bounds(run.range.start, index);
        self.runs.insert(position + 1, tail);
    }

    fn coalesce(&mut self) {
        let mut merged: Vec<TextRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(previous) if previous.attributes == run.attributes => {
                    previous.range.length += run.range.length;
                }
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blue(attrs: &mut TextAttributes) {
        attrs.color = Color::BLUE;
    }

    #[test]
    fn test_range_bounds() {
        let range = TextRange::new(6, 4);
        assert_eq!(range.end(), 10);
        assert!(range.contains(6));
        assert!(!range.contains(10));
        assert!(range.contains_inclusive_end(10));
        assert!(!range.contains_inclusive_end(11));
        assert!(!range.contains_inclusive_end(5));
    }

    #[test]
    fn test_range_overlap_and_intersection() {
        let a = TextRange::new(0, 5);
        let b = TextRange::new(4, 5);
        let c = TextRange::new(5, 2);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.intersection(&b), Some(TextRange::new(4, 1)));
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_range_clamp() {
        assert_eq!(TextRange::new(2, 4).clamp_to(10), Some(TextRange::new(2, 4)));
        assert_eq!(TextRange::new(8, 4).clamp_to(10), Some(TextRange::new(8, 2)));
        assert_eq!(TextRange::new(10, 3).clamp_to(10), None);
        assert_eq!(TextRange::new(12, 0).clamp_to(10), None);
        assert_eq!(TextRange::new(10, 0).clamp_to(10), Some(TextRange::new(10, 0)));
    }

    #[test]
    fn test_range_end_saturates() {
        let range = TextRange::new(6, usize::MAX);
        assert_eq!(range.end(), usize::MAX);
        assert!(range.contains(1_000));
        assert_eq!(range.clamp_to(10), Some(TextRange::new(6, 4)));
    }

    #[test]
    fn test_range_to_byte_range_multibyte() {
        let text = "héllo #tag";
        let range = TextRange::new(6, 4);
        assert_eq!(&text[range.to_byte_range(text)], "#tag");
        assert_eq!(TextRange::new(8, 10).to_byte_range(text), 9..text.len());
    }

    #[test]
    fn test_range_offset() {
        assert_eq!(TextRange::new(5, 2).offset_by(3), TextRange::new(8, 2));
        assert_eq!(TextRange::new(5, 2).offset_by(-10), TextRange::new(0, 2));
    }

    #[test]
    fn test_styled_text_single_run() {
        let styled = StyledText::new("hello", TextAttributes::default());
        assert_eq!(styled.len(), 5);
        assert_eq!(styled.runs().len(), 1);
        assert!(StyledText::new("", TextAttributes::default()).runs().is_empty());
    }

    #[test]
    fn test_update_splits_and_merges_runs() {
        let mut styled = StyledText::new("hello @bob check", TextAttributes::default());
        styled.update_attributes(TextRange::new(6, 4), blue);
        assert_eq!(styled.runs().len(), 3);
        assert_eq!(styled.runs()[1].range, TextRange::new(6, 4));

        styled.update_attributes(TextRange::new(6, 4), |attrs| attrs.color = Color::default());
        assert_eq!(styled.runs().len(), 1);
    }

    #[test]
    fn test_update_outside_text_is_ignored() {
        let mut styled = StyledText::new("abc", TextAttributes::default());
        styled.update_attributes(TextRange::new(10, 2), blue);
        assert_eq!(styled.runs().len(), 1);

        styled.update_attributes(TextRange::new(2, 10), blue);
        assert_eq!(styled.attributes_at(2).unwrap().1, TextRange::new(2, 1));
    }

    #[test]
    fn test_later_update_wins_on_overlap() {
        let mut styled = StyledText::new("abcdefgh", TextAttributes::default());
        styled.update_attributes(TextRange::new(0, 6), blue);
        styled.update_attributes(TextRange::new(4, 4), |attrs| attrs.color = Color::RED);

        assert_eq!(styled.attributes_at(3).unwrap().0.color, Color::BLUE);
        assert_eq!(styled.attributes_at(4).unwrap().0.color, Color::RED);
        assert_eq!(styled.attributes_at(7).unwrap().0.color, Color::RED);
        assert!(styled.attributes_at(8).is_none());
    }
}
