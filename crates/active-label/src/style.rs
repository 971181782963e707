//! Entity styling: which color and font an entity is drawn with.
//!
//! Each entity category has a color channel with a normal color and an
//! optional selected color. Emails have no channel of their own unless one
//! is configured; by default they are drawn with the URL colors.
//!
//! # Example
//!
//! ```
//! use active_label::{Color, EntityColors, EntityKind, StyleConfig};
//!
//! let config = StyleConfig {
//!     mention: EntityColors::new(Color::RED).with_selected(Color::GRAY),
//!     ..StyleConfig::default()
//! };
//!
//! let mention = EntityKind::mention("@bob");
//! assert_eq!(config.style_for(&mention, false).color, Color::RED);
//! assert_eq!(config.style_for(&mention, true).color, Color::GRAY);
//! ```

use active_label_render::{Color, Font};
use serde::{Deserialize, Serialize};

use crate::entity::{EntityCategory, EntityKind};

/// Normal and selected colors of one entity category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityColors {
    pub normal: Color,
    /// Color while pressed. Falls back to `normal` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<Color>,
}

impl EntityColors {
    /// Colors with no separate selected color.
    pub const fn new(normal: Color) -> Self {
        Self {
            normal,
            selected: None,
        }
    }

    /// Set the selected color using builder pattern.
    pub const fn with_selected(mut self, selected: Color) -> Self {
        self.selected = Some(selected);
        self
    }

    /// The color to draw with in the given selection state.
    pub fn resolve(&self, selected: bool) -> Color {
        match (selected, self.selected) {
            (true, Some(color)) => color,
            _ => self.normal,
        }
    }
}

impl Default for EntityColors {
    fn default() -> Self {
        Self::new(Color::BLUE)
    }
}

/// Styling table for every entity category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub mention: EntityColors,
    pub hashtag: EntityColors,
    pub url: EntityColors,
    /// Email colors. `None` draws emails with the URL colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EntityColors>,
    /// Font applied to every entity, regardless of kind or selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_font: Option<Font>,
}

/// The resolved appearance of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStyle {
    pub color: Color,
    /// Font override. `None` keeps the font already in the text.
    pub font: Option<Font>,
}

impl StyleConfig {
    /// The color channel used for a category.
    pub fn colors_for(&self, category: EntityCategory) -> &EntityColors {
        match category {
            EntityCategory::Mention => &self.mention,
            EntityCategory::Hashtag => &self.hashtag,
            EntityCategory::Url => &self.url,
            EntityCategory::Email => self.email.as_ref().unwrap_or(&self.url),
        }
    }

    /// Resolve the style of an entity of `kind`.
    ///
    /// A selected entity whose category has no selected color is drawn with
    /// that category's normal color.
    pub fn style_for(&self, kind: &EntityKind, selected: bool) -> EntityStyle {
        EntityStyle {
            color: self.colors_for(kind.category()).resolve(selected),
            font: self.highlight_font.clone(),
        }
    }
}
