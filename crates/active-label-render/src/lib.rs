//! Geometry, color, styled text and text layout abstractions.
//!
//! This crate provides the rendering-side vocabulary of the active label:
//!
//! - [`Point`], [`Size`], [`Rect`] and [`Color`]
//! - [`Font`], [`TextAttributes`] and [`StyledText`], a string with attribute
//!   runs over character ranges
//! - [`TextLayoutEngine`], the layout collaborator widgets delegate to, and
//!   [`FixedAdvanceLayout`], a deterministic implementation of it
//!
//! # Example
//!
//! ```
//! use active_label_render::{
//!     FixedAdvanceLayout, Point, Size, StyledText, TextAttributes, TextLayoutEngine,
//! };
//!
//! let engine = FixedAdvanceLayout::new(10.0, 20.0);
//! let text = StyledText::new("hello @bob", TextAttributes::default());
//! let layout = engine.layout(&text, Size::new(200.0, 40.0), 0);
//!
//! assert_eq!(engine.character_index_at(&layout, Point::new(75.0, 10.0)), 7);
//! ```

mod layout;
mod text;
mod types;

pub use layout::{FixedAdvanceLayout, FixedLayout, LineBox, TextLayoutEngine};
pub use text::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, Font, HorizontalAlign, LineBreakMode, ParagraphStyle,
    StyledText, TextAttributes, TextRange, TextRun,
};
pub use types::{Color, Point, Rect, Size};
