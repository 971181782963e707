//! Prelude module for the active label.
//!
//! ```
//! use active_label::prelude::*;
//! ```
//!
//! This provides the widget, the entity model, input phases and the geometry
//! and color types needed to drive them.

pub use crate::{
    ActiveLabel, ActiveLabelConfig, Entity, EntityColors, EntityDetector, EntityKind,
    LabelEvent, MouseButton, StyleConfig, TouchPhase,
};

pub use active_label_render::{Color, Font, Point, Rect, Size, TextRange};
