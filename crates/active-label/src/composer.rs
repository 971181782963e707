//! Composition of the displayed styled text.
//!
//! The composer turns the label's source text, its base attributes and the
//! entity registry into the [`StyledText`] handed to the layout engine:
//!
//! 1. The first run's attributes get the label's paragraph policy.
//! 2. The label's font and color are applied over the first run.
//! 3. Each entity, in registry order, is drawn with the first run's
//!    attributes plus its normal color and the highlight font. Later entities
//!    win where ranges overlap.

use active_label_core::PerfSpan;
use active_label_core::logging::targets;
use active_label_render::{
    Color, Font, HorizontalAlign, LineBreakMode, StyledText, TextAttributes, TextRange,
};

use crate::registry::EntityRegistry;
use crate::style::{EntityStyle, StyleConfig};

/// Line height used when no minimum is set, as a multiple of the font size.
pub const MINIMUM_LINE_HEIGHT_FACTOR: f32 = 1.14;

/// The label properties composition depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeOptions {
    pub font: Font,
    pub text_color: Color,
    pub alignment: HorizontalAlign,
    pub line_spacing: f32,
    /// Minimum line height. Values `<= 0` use the font size times
    /// [`MINIMUM_LINE_HEIGHT_FACTOR`].
    pub minimum_line_height: f32,
}

impl ComposeOptions {
    /// The minimum line height actually applied.
    pub fn effective_minimum_line_height(&self) -> f32 {
        if self.minimum_line_height > 0.0 {
            self.minimum_line_height
        } else {
            self.font.size * MINIMUM_LINE_HEIGHT_FACTOR
        }
    }
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            font: Font::default(),
            text_color: Color::BLACK,
            alignment: HorizontalAlign::Left,
            line_spacing: 0.0,
            minimum_line_height: 0.0,
        }
    }
}

/// Build the styled text to display.
pub fn compose(
    source: &StyledText,
    options: &ComposeOptions,
    registry: &EntityRegistry,
    styles: &StyleConfig,
) -> StyledText {
    let _span = PerfSpan::new("compose");

    let Some((first, first_range)) = source.attributes_at(0) else {
        return StyledText::empty();
    };

    let mut template = first.clone();
    template.paragraph.line_break_mode = LineBreakMode::WordWrap;
    template.paragraph.alignment = options.alignment;
    template.paragraph.line_spacing = options.line_spacing;
    template.paragraph.minimum_line_height = options.effective_minimum_line_height();
    template.font = options.font.clone();
    template.color = options.text_color;

    let mut styled = source.clone();
    styled.set_attributes(first_range, &template);

    for entity in registry.iter() {
        let style = styles.style_for(entity.kind(), false);
        styled.set_attributes(entity.range(), &entity_attributes(&template, &style));
    }

    tracing::debug!(
        target: targets::COMPOSE,
        chars = styled.len(),
        entities = registry.len(),
        runs = styled.runs().len(),
        "text composed"
    );
    styled
}

/// Draw `range` with `style`, leaving its other attributes alone.
pub fn restyle(styled: &mut StyledText, range: TextRange, style: &EntityStyle) {
    styled.update_attributes(range, |attrs| {
        attrs.color = style.color;
        if let Some(font) = &style.font {
            attrs.font = font.clone();
        }
    });
}

fn entity_attributes(template: &TextAttributes, style: &EntityStyle) -> TextAttributes {
    let mut attributes = template.clone();
    attributes.color = style.color;
    if let Some(font) = &style.font {
        attributes.font = font.clone();
    }
    attributes
}
