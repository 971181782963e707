//! TOML configuration for the active label.
//!
//! Every key is optional; missing keys keep their defaults.
//!
//! ```toml
//! line_spacing = 2.0
//! url_maximum_length = 30
//! revert_delay_ms = 250
//!
//! [mention]
//! normal = "#1DA1F2"
//! selected = "#0B5C8E"
//!
//! [hashtag]
//! normal = "#17BF63"
//!
//! [url]
//! normal = "#794BC4"
//!
//! [highlight_font]
//! family = "Helvetica Neue"
//! size = 17.0
//! ```

use std::path::Path;
use std::time::Duration;

use active_label_core::logging::targets;
use active_label_core::{LabelError, Result};
use active_label_render::Font;
use serde::{Deserialize, Serialize};

use crate::style::{EntityColors, StyleConfig};

/// Default delay between releasing an entity and restoring its style.
pub const DEFAULT_REVERT_DELAY_MS: u64 = 250;

/// Declarative label settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveLabelConfig {
    pub line_spacing: f32,
    /// Minimum line height; `0` derives it from the font size.
    pub minimum_line_height: f32,
    /// Length URL display text is trimmed to, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_maximum_length: Option<usize>,
    pub revert_delay_ms: u64,
    /// Maximum number of lines; `0` is unlimited.
    pub number_of_lines: usize,
    pub mention: EntityColors,
    pub hashtag: EntityColors,
    pub url: EntityColors,
    /// Email colors. Unset draws emails with the URL colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EntityColors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_font: Option<Font>,
}

impl Default for ActiveLabelConfig {
    fn default() -> Self {
        let style = StyleConfig::default();
        Self {
            line_spacing: 0.0,
            minimum_line_height: 0.0,
            url_maximum_length: None,
            revert_delay_ms: DEFAULT_REVERT_DELAY_MS,
            number_of_lines: 0,
            mention: style.mention,
            hashtag: style.hashtag,
            url: style.url,
            email: style.email,
            highlight_font: style.highlight_font,
        }
    }
}

impl ActiveLabelConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| LabelError::config(e.to_string()))?;
        tracing::debug!(target: targets::CONFIG, ?config, "configuration parsed");
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LabelError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| LabelError::config(e.to_string()))
    }

    /// The styling table described by this configuration.
    pub fn style(&self) -> StyleConfig {
        StyleConfig {
            mention: self.mention,
            hashtag: self.hashtag,
            url: self.url,
            email: self.email,
            highlight_font: self.highlight_font.clone(),
        }
    }

    /// Get the revert delay as a duration.
    pub fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.revert_delay_ms)
    }
}
