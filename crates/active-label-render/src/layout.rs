//! Text layout collaborator interface.
//!
//! Widgets do not shape or rasterize text themselves. They hand styled text
//! to a [`TextLayoutEngine`] and ask it for geometry: the bounding rectangle
//! of the laid-out glyphs, the character under a point, and the size the text
//! actually uses.
//!
//! [`FixedAdvanceLayout`] is a deterministic engine in which every character
//! has the same advance and every line the same height. It is intended for
//! tests, demos and terminal-like hosts; real hosts plug in their own shaper.

use crate::text::{HorizontalAlign, LineBreakMode, StyledText, TextRange};
use crate::types::{Point, Rect, Size};

/// The text layout engine a widget delegates to.
pub trait TextLayoutEngine: Send + Sync {
    /// Opaque result of laying out a block of text.
    type Layout: Send + Sync;

    /// Lay out `text` inside a container of the given size.
    ///
    /// A container width of `f32::INFINITY` means unconstrained. `max_lines`
    /// of 0 means no line limit.
    fn layout(&self, text: &StyledText, container: Size, max_lines: usize) -> Self::Layout;

    /// The rectangle enclosing every laid-out glyph, in container coordinates.
    fn bounding_rect(&self, layout: &Self::Layout) -> Rect;

    /// The index of the character under `point`, in container coordinates.
    ///
    /// Points outside the text resolve to the nearest character.
    fn character_index_at(&self, layout: &Self::Layout, point: Point) -> usize;

    /// The size actually used by the laid-out text.
    fn used_size(&self, layout: &Self::Layout) -> Size;
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    /// Characters shown on this line, excluding a terminating newline.
    pub range: TextRange,
    /// Line rectangle in container coordinates.
    pub rect: Rect,
}

/// Layout produced by [`FixedAdvanceLayout`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixedLayout {
    lines: Vec<LineBox>,
    advance: f32,
}

impl FixedLayout {
    /// The laid-out lines, top to bottom.
    pub fn lines(&self) -> &[LineBox] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// A layout engine with a fixed per-character advance and line height.
///
/// Fonts are ignored; the paragraph style of the first run controls
/// alignment, line breaking, line spacing and minimum line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceLayout {
    advance: f32,
    line_height: f32,
}

impl FixedAdvanceLayout {
    /// Create an engine with the given character advance and line height.
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance: advance.max(f32::EPSILON),
            line_height,
        }
    }

    pub fn advance(&self) -> f32 {
        self.advance
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Break `chars` into line ranges.
    fn break_lines(
        chars: &[char],
        max_chars: Option<usize>,
        mode: LineBreakMode,
    ) -> Vec<TextRange> {
        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut last_break: Option<usize> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\n' {
                lines.push(TextRange::from_bounds(line_start, i));
                line_start = i + 1;
                last_break = None;
                i += 1;
                continue;
            }

            if let Some(max) = max_chars
                && i - line_start >= max
                && c != ' '
            {
                let brk = match (mode, last_break) {
                    (LineBreakMode::WordWrap, Some(b)) if b > line_start => b,
                    _ => i,
                };
                lines.push(TextRange::from_bounds(line_start, brk));
                line_start = brk;
                last_break = None;
                i = brk;
                continue;
            }

            if c == ' ' {
                last_break = Some(i + 1);
            }
            i += 1;
        }

        if line_start < chars.len() || chars.last() == Some(&'\n') {
            lines.push(TextRange::from_bounds(line_start, chars.len()));
        }
        lines
    }
}

impl Default for FixedAdvanceLayout {
    fn default() -> Self {
        Self::new(8.0, 20.0)
    }
}

impl TextLayoutEngine for FixedAdvanceLayout {
    type Layout = FixedLayout;

    fn layout(&self, text: &StyledText, container: Size, max_lines: usize) -> FixedLayout {
        let paragraph = text
            .runs()
            .first()
            .map(|run| run.attributes.paragraph)
            .unwrap_or_default();

        let wraps =
            container.width.is_finite() && paragraph.line_break_mode != LineBreakMode::Clip;
        let max_chars = wraps.then(|| ((container.width / self.advance).floor() as usize).max(1));

        let chars: Vec<char> = text.text().chars().collect();
        let mut ranges = Self::break_lines(&chars, max_chars, paragraph.line_break_mode);
        if max_lines > 0 {
            ranges.truncate(max_lines);
        }

        let line_height = self.line_height.max(paragraph.minimum_line_height);
        let pitch = line_height + paragraph.line_spacing;

        let lines = ranges
            .into_iter()
            .enumerate()
            .map(|(row, range)| {
                let width = range.length as f32 * self.advance;
                let x = if container.width.is_finite() {
                    match paragraph.alignment {
                        HorizontalAlign::Left => 0.0,
                        HorizontalAlign::Center => ((container.width - width) / 2.0).max(0.0),
                        HorizontalAlign::Right => (container.width - width).max(0.0),
                    }
                } else {
                    0.0
                };
                LineBox {
                    range,
                    rect: Rect::new(x, row as f32 * pitch, width, line_height),
                }
            })
            .collect();

        FixedLayout {
            lines,
            advance: self.advance,
        }
    }

    fn bounding_rect(&self, layout: &FixedLayout) -> Rect {
        layout
            .lines
            .iter()
            .fold(Rect::ZERO, |acc, line| acc.union(&line.rect))
    }

    fn character_index_at(&self, layout: &FixedLayout, point: Point) -> usize {
        let Some(last) = layout.lines.last() else {
            return 0;
        };

        // Rows own the spacing below them; points past the last row snap to it.
        let line = layout
            .lines
            .windows(2)
            .find(|pair| point.y < pair[1].rect.top())
            .map_or(last, |pair| &pair[0]);

        if line.range.is_empty() {
            return line.range.start;
        }
        let column = ((point.x - line.rect.left()) / layout.advance).floor().max(0.0) as usize;
        line.range.start + column.min(line.range.length - 1)
    }

    fn used_size(&self, layout: &FixedLayout) -> Size {
        let width = layout
            .lines
            .iter()
            .map(|line| line.rect.width())
            .fold(0.0, f32::max);
        let height = layout.lines.last().map_or(0.0, |line| line.rect.bottom());
        Size::new(width, height)
    }
}

static_assertions::assert_impl_all!(FixedAdvanceLayout: Send, Sync);
