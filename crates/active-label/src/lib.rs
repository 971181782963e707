//! Active label: a text label that highlights entities and reports taps on
//! them.
//!
//! Entities are spans of the displayed text classified as mentions, hashtags,
//! emails or URLs. They are found by an external tokenizer (any
//! [`EntityDetector`]) and installed on the label, which then:
//!
//! - draws each entity with its category's color ([`StyleConfig`])
//! - maps touches to entities through a [`TextLayoutEngine`]
//! - tracks the pressed entity with a small state machine
//!   ([`SelectionMachine`]) and restores its style after a revert delay
//! - emits [`ActiveLabel::entity_selected`] when a tap is released
//!
//! # Example
//!
//! ```
//! use active_label::prelude::*;
//!
//! let mut label = ActiveLabel::new("hello @bob check #news");
//! label.set_entities(vec![
//!     Entity::new(TextRange::new(6, 4), EntityKind::mention("@bob")),
//!     Entity::new(TextRange::new(17, 5), EntityKind::hashtag("#news")),
//! ]);
//!
//! assert_eq!(label.entity_at_index(8).map(Entity::primary_text), Some("@bob"));
//! assert_eq!(label.entity_at_index(20).map(Entity::primary_text), Some("#news"));
//! assert!(label.entity_at_index(12).is_none());
//! ```
//!
//! # Configuration
//!
//! Colors, the highlight font and timing can be loaded from TOML with
//! [`ActiveLabelConfig`] and applied with [`ActiveLabel::apply_config`].

mod composer;
mod config;
mod detector;
mod entity;
mod events;
mod label;
mod registry;
mod selection;
mod style;
mod trim;

pub mod prelude;

pub use composer::{ComposeOptions, MINIMUM_LINE_HEIGHT_FACTOR, compose, restyle};
pub use config::{ActiveLabelConfig, DEFAULT_REVERT_DELAY_MS};
pub use detector::EntityDetector;
pub use entity::{Entity, EntityCategory, EntityKind, UserInfo};
pub use events::{EventBase, LabelEvent, MouseButton, MouseEvent, TouchEvent, TouchPhase};
pub use hit_test::{HitTester, entity_at_index};
pub use label::{ActiveLabel, DEFAULT_REVERT_DELAY};
pub use registry::EntityRegistry;
pub use selection::{Selection, SelectionEffect, SelectionMachine, SelectionState, TouchResponse};
pub use style::{EntityColors, EntityStyle, StyleConfig};
pub use trim::{TRIM_SUFFIX, trim_to_length, trim_urls};

pub use active_label_core::{LabelError, Result, Signal};
pub use active_label_render::{
    Color, FixedAdvanceLayout, Font, HorizontalAlign, Point, Rect, Size, StyledText,
    TextAttributes, TextLayoutEngine, TextRange,
};
