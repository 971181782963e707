//! Entity model: classified, positioned spans of displayed text.
//!
//! An [`Entity`] couples a character range of the displayed string with an
//! [`EntityKind`] describing what the span is. Kinds carry their payload
//! (the matched text, and for URLs the display, trimmed and canonical forms)
//! plus optional [`UserInfo`] that callers attach for their own use.
//!
//! # Example
//!
//! ```
//! use active_label::{Entity, EntityKind, TextRange};
//!
//! let entity = Entity::new(TextRange::new(6, 4), EntityKind::mention("@bob"));
//! assert_eq!(entity.primary_text(), "@bob");
//! ```

use active_label_render::TextRange;

use crate::trim::trim_to_length;

/// Opaque per-entity metadata.
///
/// The widget never inspects it; callers define its schema.
pub type UserInfo = serde_json::Map<String, serde_json::Value>;

/// The semantic classification of an entity, with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// A user mention such as `@bob`.
    Mention {
        text: String,
        user_info: Option<UserInfo>,
    },
    /// A hashtag such as `#news`.
    Hashtag {
        text: String,
        user_info: Option<UserInfo>,
    },
    /// An email address.
    Email {
        text: String,
        user_info: Option<UserInfo>,
    },
    /// A link.
    Url {
        /// Text as it appears in the label.
        display_text: String,
        /// Display text shortened for presentation.
        trimmed_text: String,
        /// The link target.
        canonical_url: String,
        user_info: Option<UserInfo>,
    },
}

/// Fieldless discriminant of [`EntityKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Mention,
    Hashtag,
    Email,
    Url,
}

impl EntityKind {
    /// Create a mention with no metadata.
    pub fn mention(text: impl Into<String>) -> Self {
        Self::Mention {
            text: text.into(),
            user_info: None,
        }
    }

    /// Create a hashtag with no metadata.
    pub fn hashtag(text: impl Into<String>) -> Self {
        Self::Hashtag {
            text: text.into(),
            user_info: None,
        }
    }

    /// Create an email with no metadata.
    pub fn email(text: impl Into<String>) -> Self {
        Self::Email {
            text: text.into(),
            user_info: None,
        }
    }

    /// A URL whose display text is used untrimmed.
    pub fn url(display_text: impl Into<String>, canonical_url: impl Into<String>) -> Self {
        let display_text = display_text.into();
        Self::Url {
            trimmed_text: display_text.clone(),
            display_text,
            canonical_url: canonical_url.into(),
            user_info: None,
        }
    }

    /// A URL whose trimmed text is limited to `maximum_length` characters
    /// followed by `"..."`.
    pub fn url_trimmed(
        display_text: impl Into<String>,
        canonical_url: impl Into<String>,
        maximum_length: usize,
    ) -> Self {
        let display_text = display_text.into();
        Self::Url {
            trimmed_text: trim_to_length(&display_text, maximum_length).into_owned(),
            display_text,
            canonical_url: canonical_url.into(),
            user_info: None,
        }
    }

    /// Attach user metadata, replacing any already present.
    pub fn with_user_info(mut self, info: UserInfo) -> Self {
        match &mut self {
            Self::Mention { user_info, .. }
            | Self::Hashtag { user_info, .. }
            | Self::Email { user_info, .. }
            | Self::Url { user_info, .. } => *user_info = Some(info),
        }
        self
    }

    /// The text this entity stands for: the matched text, or the display
    /// text for URLs.
    pub fn primary_text(&self) -> &str {
        match self {
            Self::Mention { text, .. } | Self::Hashtag { text, .. } | Self::Email { text, .. } => {
                text
            }
            Self::Url { display_text, .. } => display_text,
        }
    }

    /// Get the caller's metadata, if any was attached.
    pub fn user_info(&self) -> Option<&UserInfo> {
        match self {
            Self::Mention { user_info, .. }
            | Self::Hashtag { user_info, .. }
            | Self::Email { user_info, .. }
            | Self::Url { user_info, .. } => user_info.as_ref(),
        }
    }

    /// Get the kind without its payload.
    pub fn category(&self) -> EntityCategory {
        match self {
            Self::Mention { .. } => EntityCategory::Mention,
            Self::Hashtag { .. } => EntityCategory::Hashtag,
            Self::Email { .. } => EntityCategory::Email,
            Self::Url { .. } => EntityCategory::Url,
        }
    }
}

/// A detected span of the displayed text and its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    range: TextRange,
    kind: EntityKind,
}

impl Entity {
    /// Create an entity covering `range`.
    pub fn new(range: TextRange, kind: EntityKind) -> Self {
        Self { range, kind }
    }

    /// The character range this entity covers.
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Move the entity, e.g. after the text it points into was normalized.
    pub fn set_range(&mut self, range: TextRange) {
        self.range = range;
    }

    /// Get the classification and payload.
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut EntityKind {
        &mut self.kind
    }

    /// Get the text the entity stands for.
    pub fn primary_text(&self) -> &str {
        self.kind.primary_text()
    }

    /// Whether both entities cover exactly the same characters.
    ///
    /// Selection tracks entities by range, not by identity.
    pub fn same_range(&self, other: &Entity) -> bool {
        self.range == other.range
    }
}
