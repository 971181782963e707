//! The active label widget.
//!
//! [`ActiveLabel`] displays text in which mentions, hashtags, emails and URLs
//! are drawn with their own colors, and reports taps on them through the
//! [`entity_selected`](ActiveLabel::entity_selected) signal.
//!
//! A tapped entity is drawn with its selected color while the finger is down
//! and for a short revert delay after release. Hosts drive that delay by
//! calling [`process_timers`](ActiveLabel::process_timers) from their event
//! loop; [`time_until_next_timer`](ActiveLabel::time_until_next_timer) tells
//! them how long they may sleep.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::time::{Duration, Instant};
//!
//! use active_label::{ActiveLabel, Entity, EntityKind, Point, Rect, TextRange, TouchPhase};
//!
//! let mut label = ActiveLabel::new("hello @bob check #news");
//! label.set_entities(vec![
//!     Entity::new(TextRange::new(6, 4), EntityKind::mention("@bob")),
//!     Entity::new(TextRange::new(17, 5), EntityKind::hashtag("#news")),
//! ]);
//! label.draw(Rect::new(0.0, 0.0, 400.0, 20.0));
//!
//! let taps = Arc::new(AtomicUsize::new(0));
//! let counter = taps.clone();
//! label.entity_selected.connect(move |_entity| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! // The default engine advances 8 points per character, so x = 60 is inside "@bob".
//! let now = Instant::now();
//! assert!(label.handle_touch(TouchPhase::Started, Point::new(60.0, 10.0), now));
//! assert!(label.handle_touch(TouchPhase::Ended, Point::new(60.0, 10.0), now));
//! assert_eq!(taps.load(Ordering::SeqCst), 1);
//!
//! label.process_timers(now + Duration::from_millis(250));
//! assert!(label.selected_entity().is_none());
//! ```

use std::time::{Duration, Instant};

use parking_lot::RwLock;

use active_label_core::logging::targets;
use active_label_core::{Signal, TimerId, TimerManager};
use active_label_render::{
    Color, FixedAdvanceLayout, Font, HorizontalAlign, Point, Rect, Size, StyledText,
    TextAttributes, TextLayoutEngine,
};

use crate::composer::{self, ComposeOptions};
use crate::config::{ActiveLabelConfig, DEFAULT_REVERT_DELAY_MS};
use crate::detector::EntityDetector;
use crate::entity::Entity;
use crate::events::{LabelEvent, MouseButton, TouchPhase};
use crate::hit_test::HitTester;
use crate::registry::EntityRegistry;
use crate::selection::{SelectionEffect, SelectionMachine, SelectionState};
use crate::style::StyleConfig;
use crate::trim::trim_urls;

/// Default delay between releasing an entity and restoring its style.
pub const DEFAULT_REVERT_DELAY: Duration = Duration::from_millis(DEFAULT_REVERT_DELAY_MS);

/// A label that highlights entities and reports taps on them.
///
/// The label is generic over its [`TextLayoutEngine`]. It defaults to
/// [`FixedAdvanceLayout`]; hosts with a real text shaper use
/// [`with_engine`](Self::with_engine).
pub struct ActiveLabel<E: TextLayoutEngine = FixedAdvanceLayout> {
    engine: E,

    /// Text as set by the caller, before entity styling.
    source: StyledText,

    /// `source` with its URLs shortened, when any were.
    trimmed: Option<StyledText>,

    /// Composed text handed to the layout engine.
    styled: StyledText,

    registry: EntityRegistry,
    styles: StyleConfig,

    font: Font,
    text_color: Color,
    alignment: HorizontalAlign,
    number_of_lines: usize,
    line_spacing: f32,
    minimum_line_height: f32,
    url_maximum_length: Option<usize>,
    revert_delay: Duration,
    preferred_max_layout_width: f32,

    /// Container size the text is laid out in.
    size: Size,

    /// Vertical offset of the text within the last drawn rectangle.
    height_correction: f32,

    selection: SelectionMachine,
    timers: TimerManager<u64>,
    /// Timer and generation of the scheduled revert.
    pending_revert: Option<(TimerId, u64)>,
    mouse_pressed: bool,

    cached_layout: RwLock<Option<CachedLayout<E::Layout>>>,

    /// Emitted with the entity when a tap on it is released.
    pub entity_selected: Signal<Entity>,

    /// Emitted with the new text when the text changes.
    pub text_changed: Signal<String>,
}

struct CachedLayout<L> {
    layout: L,
    size: Size,
    max_lines: usize,
}

impl ActiveLabel<FixedAdvanceLayout> {
    /// Create a label using the fixed-advance layout engine.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_engine(FixedAdvanceLayout::default(), text)
    }
}

impl<E: TextLayoutEngine> ActiveLabel<E> {
    /// Create a label laid out by `engine`.
    ///
    /// The label starts with the default system font, black text, left
    /// alignment, unlimited lines, and blue entities.
    pub fn with_engine(engine: E, text: impl Into<String>) -> Self {
        let font = Font::default();
        let text_color = Color::BLACK;
        let mut label = Self {
            engine,
            source: StyledText::new(text, TextAttributes::new(font.clone(), text_color)),
            trimmed: None,
            styled: StyledText::empty(),
            registry: EntityRegistry::new(),
            styles: StyleConfig::default(),
            font,
            text_color,
            alignment: HorizontalAlign::Left,
            number_of_lines: 0,
            line_spacing: 0.0,
            minimum_line_height: 0.0,
            url_maximum_length: None,
            revert_delay: DEFAULT_REVERT_DELAY,
            preferred_max_layout_width: 0.0,
            size: Size::new(f32::INFINITY, f32::INFINITY),
            height_correction: 0.0,
            selection: SelectionMachine::new(),
            timers: TimerManager::new(),
            pending_revert: None,
            mouse_pressed: false,
            cached_layout: RwLock::new(None),
            entity_selected: Signal::new(),
            text_changed: Signal::new(),
        };
        label.recompose();
        label
    }

    /// The layout engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    // =========================================================================
    // Text and entities
    // =========================================================================

    /// The displayed text, with URLs shortened.
    pub fn text(&self) -> &str {
        self.displayed().text()
    }

    /// The text as last set, before URLs were shortened.
    pub fn source_text(&self) -> &str {
        self.source.text()
    }

    /// Set the text to display.
    ///
    /// The entities of the previous text are discarded and any selection is
    /// dropped, even when `text` equals the current text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let attributes = TextAttributes::new(self.font.clone(), self.text_color);
        self.replace_source(StyledText::new(text.into(), attributes));
    }

    /// Set the text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Set pre-styled text to display.
    ///
    /// The label's font, color and paragraph policy still apply to the first
    /// run. Entities and the selection are discarded as for
    /// [`set_text`](Self::set_text).
    pub fn set_styled_text(&mut self, styled: StyledText) {
        self.replace_source(styled);
    }

    /// Set the text and install the entities `detector` finds in it.
    pub fn set_text_with_detector<D>(&mut self, text: impl Into<String>, detector: &D)
    where
        D: EntityDetector + ?Sized,
    {
        self.set_text(text);
        let entities = detector.detect(self.source.text());
        self.set_entities(entities);
    }

    /// The composed text, as drawn.
    pub fn styled_text(&self) -> &StyledText {
        &self.styled
    }

    /// Replace the entities of the current text.
    ///
    /// `entities` index into the text as set, not the displayed text. Ranges
    /// reaching past its end are clamped, and entities starting past it are
    /// dropped, with a warning. Any selection is dropped. When a URL maximum
    /// length is set, URLs in the displayed text are shortened to it and the
    /// installed ranges are shifted to match; `text_changed` is emitted if
    /// that changes the displayed text.
    pub fn set_entities(&mut self, entities: Vec<Entity>) {
        self.drop_selection();
        let previous = self.trimmed.take();
        self.registry.set_entities(entities);
        self.registry.clamp_to(self.source.len());

        if let Some(maximum) = self.url_maximum_length {
            self.trim_displayed_urls(maximum);
        }
        self.recompose();

        let before = previous.as_ref().unwrap_or(&self.source).text();
        if before != self.text() {
            self.text_changed.emit(self.text().to_string());
        }
    }

    /// The entities in the order they were installed.
    pub fn entities(&self) -> &[Entity] {
        self.registry.all()
    }

    /// The entity covering character `index`.
    ///
    /// An entity also answers for the index one past its end.
    pub fn entity_at_index(&self, index: usize) -> Option<&Entity> {
        crate::hit_test::entity_at_index(&self.registry, index)
    }

    /// The entity under `point`, in label coordinates.
    pub fn entity_at_point(&self, point: Point) -> Option<&Entity> {
        let index = self.with_layout(|engine, layout| {
            HitTester::new(engine, layout, self.styled.len())
                .with_height_correction(self.height_correction)
                .character_index_at(point)
        })?;
        self.registry.entity_at(index)
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Get the base font.
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Set the base font.
    pub fn set_font(&mut self, font: Font) {
        if self.font != font {
            self.font = font;
            self.recompose();
        }
    }

    /// Set the base font using builder pattern.
    pub fn with_font(mut self, font: Font) -> Self {
        self.set_font(font);
        self
    }

    /// Get the color of text outside entities.
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Set the color of text outside entities.
    pub fn set_text_color(&mut self, color: Color) {
        if self.text_color != color {
            self.text_color = color;
            self.recompose();
        }
    }

    /// Set the text color using builder pattern.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.set_text_color(color);
        self
    }

    /// Get the horizontal text alignment.
    pub fn alignment(&self) -> HorizontalAlign {
        self.alignment
    }

    /// Set the horizontal text alignment.
    pub fn set_alignment(&mut self, alignment: HorizontalAlign) {
        if self.alignment != alignment {
            self.alignment = alignment;
            self.recompose();
        }
    }

    /// Set the alignment using builder pattern.
    pub fn with_alignment(mut self, alignment: HorizontalAlign) -> Self {
        self.set_alignment(alignment);
        self
    }

    /// Get the line limit. `0` means unlimited.
    pub fn number_of_lines(&self) -> usize {
        self.number_of_lines
    }

    /// Limit the number of lines shown. `0` means unlimited.
    pub fn set_number_of_lines(&mut self, lines: usize) {
        if self.number_of_lines != lines {
            self.number_of_lines = lines;
            self.invalidate_layout();
        }
    }

    /// Limit the number of lines using builder pattern.
    pub fn with_number_of_lines(mut self, lines: usize) -> Self {
        self.set_number_of_lines(lines);
        self
    }

    /// Get the extra space between lines.
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    /// Set the extra space between lines.
    pub fn set_line_spacing(&mut self, spacing: f32) {
        if self.line_spacing != spacing {
            self.line_spacing = spacing;
            self.recompose();
        }
    }

    /// Get the minimum line height.
    pub fn minimum_line_height(&self) -> f32 {
        self.minimum_line_height
    }

    /// Set the minimum line height. `0` derives it from the font size.
    pub fn set_minimum_line_height(&mut self, height: f32) {
        if self.minimum_line_height != height {
            self.minimum_line_height = height;
            self.recompose();
        }
    }

    /// Get the entity colors and highlight font.
    pub fn style_config(&self) -> &StyleConfig {
        &self.styles
    }

    /// Replace the entity colors and highlight font.
    pub fn set_style_config(&mut self, styles: StyleConfig) {
        if self.styles != styles {
            self.styles = styles;
            self.recompose();
        }
    }

    /// Set the entity styling using builder pattern.
    pub fn with_style_config(mut self, styles: StyleConfig) -> Self {
        self.set_style_config(styles);
        self
    }

    /// Set the font every entity is drawn with.
    pub fn set_highlight_font(&mut self, font: Option<Font>) {
        if self.styles.highlight_font != font {
            self.styles.highlight_font = font;
            self.recompose();
        }
    }

    /// Get the length URLs are shortened to, if any.
    pub fn url_maximum_length(&self) -> Option<usize> {
        self.url_maximum_length
    }

    /// Set the length URLs are shortened to.
    ///
    /// Takes effect the next time entities are installed.
    pub fn set_url_maximum_length(&mut self, maximum: Option<usize>) {
        self.url_maximum_length = maximum;
    }

    /// Get how long a released entity keeps its selected style.
    pub fn revert_delay(&self) -> Duration {
        self.revert_delay
    }

    /// Set how long a released entity keeps its selected style.
    pub fn set_revert_delay(&mut self, delay: Duration) {
        self.revert_delay = delay;
    }

    /// Set the revert delay using builder pattern.
    pub fn with_revert_delay(mut self, delay: Duration) -> Self {
        self.revert_delay = delay;
        self
    }

    /// Get the width the intrinsic size is computed for.
    pub fn preferred_max_layout_width(&self) -> f32 {
        self.preferred_max_layout_width
    }

    /// Width the intrinsic size is computed for. `0` means unconstrained.
    pub fn set_preferred_max_layout_width(&mut self, width: f32) {
        self.preferred_max_layout_width = width;
    }

    /// Container size the text is laid out in.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the container size without drawing.
    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.invalidate_layout();
        }
    }

    /// Apply every setting of `config`.
    pub fn apply_config(&mut self, config: &ActiveLabelConfig) {
        tracing::debug!(target: targets::CONFIG, "applying label configuration");
        self.styles = config.style();
        self.line_spacing = config.line_spacing;
        self.minimum_line_height = config.minimum_line_height;
        self.url_maximum_length = config.url_maximum_length;
        self.revert_delay = config.revert_delay();
        self.number_of_lines = config.number_of_lines;
        self.recompose();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The pressed or releasing entity, if any.
    pub fn selected_entity(&self) -> Option<&Entity> {
        self.selection.selected()
    }

    /// Get the state of the selection machine.
    pub fn selection_state(&self) -> &SelectionState {
        self.selection.state()
    }

    /// Feed one touch phase at `point` (label coordinates) to the label.
    ///
    /// Returns `true` when the label consumed the touch. Unconsumed touches
    /// should get the host's default handling.
    pub fn handle_touch(&mut self, phase: TouchPhase, point: Point, now: Instant) -> bool {
        let hit = match phase {
            TouchPhase::Started | TouchPhase::Moved => self.entity_at_point(point).cloned(),
            TouchPhase::Ended | TouchPhase::Cancelled => None,
        };
        let response = self.selection.handle(phase, hit);
        self.apply_effects(response.effects, now);
        self.cancel_stale_revert();
        response.consumed
    }

    /// Mouse press. Only the left button selects.
    pub fn handle_mouse_press(&mut self, button: MouseButton, point: Point, now: Instant) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        self.mouse_pressed = true;
        self.handle_touch(TouchPhase::Started, point, now)
    }

    /// Mouse move. Ignored unless the left button is held.
    pub fn handle_mouse_move(&mut self, point: Point, now: Instant) -> bool {
        if !self.mouse_pressed {
            return false;
        }
        self.handle_touch(TouchPhase::Moved, point, now)
    }

    /// Mouse release.
    pub fn handle_mouse_release(
        &mut self,
        button: MouseButton,
        point: Point,
        now: Instant,
    ) -> bool {
        if button != MouseButton::Left || !self.mouse_pressed {
            return false;
        }
        self.mouse_pressed = false;
        self.handle_touch(TouchPhase::Ended, point, now)
    }

    /// Dispatch an event, accepting it when the label consumed it.
    pub fn event(&mut self, event: &mut LabelEvent, now: Instant) -> bool {
        let consumed = match *event {
            LabelEvent::Touch(touch) => self.handle_touch(touch.phase, touch.local_pos, now),
            LabelEvent::MousePress(mouse) => {
                self.handle_mouse_press(mouse.button, mouse.local_pos, now)
            }
            LabelEvent::MouseMove(mouse) => self.handle_mouse_move(mouse.local_pos, now),
            LabelEvent::MouseRelease(mouse) => {
                self.handle_mouse_release(mouse.button, mouse.local_pos, now)
            }
        };
        event.set_accepted(consumed);
        consumed
    }

    /// Fire every revert due at `now`. Returns how many reverted a selection.
    pub fn process_timers(&mut self, now: Instant) -> usize {
        let mut reverted = 0;
        for (id, generation) in self.timers.process_expired(now) {
            if self.pending_revert.is_some_and(|(pending, _)| pending == id) {
                self.pending_revert = None;
            }
            tracing::trace!(target: targets::TIMER, generation, "revert timer fired");
            let effects = self.selection.revert(generation);
            if !effects.is_empty() {
                reverted += 1;
            }
            self.apply_effects(effects, now);
        }
        reverted
    }

    /// Time until the next scheduled revert, if any.
    pub fn time_until_next_timer(&mut self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Lay the text out in `rect` and return the origin to draw it at.
    ///
    /// Text shorter than the rectangle is centered vertically. The offset is
    /// remembered and subtracted from points during hit testing.
    pub fn draw(&mut self, rect: Rect) -> Point {
        self.set_size(Size::new(rect.width(), rect.height()));
        let used = self.with_layout(|engine, layout| engine.used_size(layout));
        self.height_correction = ((rect.height() - used.height) / 2.0).max(0.0);
        Point::new(rect.left(), rect.top() + self.height_correction)
    }

    /// Vertical offset computed by the last [`draw`](Self::draw).
    pub fn height_correction(&self) -> f32 {
        self.height_correction
    }

    /// The size the text needs at the preferred maximum layout width.
    pub fn intrinsic_size(&self) -> Size {
        if self.styled.is_empty() {
            return Size::ZERO;
        }
        let width = if self.preferred_max_layout_width > 0.0 {
            self.preferred_max_layout_width
        } else {
            f32::INFINITY
        };
        let layout = self
            .engine
            .layout(&self.styled, Size::new(width, f32::INFINITY), self.number_of_lines);
        self.engine.used_size(&layout).ceil()
    }

    /// Run `f` with the layout for the current text and container size.
    pub fn with_layout<R>(&self, f: impl FnOnce(&E, &E::Layout) -> R) -> R {
        let mut cached = self.cached_layout.write();
        let cache = match cached.take() {
            Some(cache) if cache.size == self.size && cache.max_lines == self.number_of_lines => {
                cached.insert(cache)
            }
            _ => cached.insert(CachedLayout {
                layout: self.engine.layout(&self.styled, self.size, self.number_of_lines),
                size: self.size,
                max_lines: self.number_of_lines,
            }),
        };
        f(&self.engine, &cache.layout)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn invalidate_layout(&self) {
        *self.cached_layout.write() = None;
    }

    fn displayed(&self) -> &StyledText {
        self.trimmed.as_ref().unwrap_or(&self.source)
    }

    fn replace_source(&mut self, source: StyledText) {
        self.drop_selection();
        self.registry.clear();
        self.trimmed = None;
        self.source = source;
        self.recompose();
        self.text_changed.emit(self.source.text().to_string());
    }

    fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            font: self.font.clone(),
            text_color: self.text_color,
            alignment: self.alignment,
            line_spacing: self.line_spacing,
            minimum_line_height: self.minimum_line_height,
        }
    }

    fn recompose(&mut self) {
        if self.source.is_empty() && !self.registry.is_empty() {
            self.registry.clear();
        }
        self.styled = composer::compose(
            self.displayed(),
            &self.compose_options(),
            &self.registry,
            &self.styles,
        );
        if let Some(entity) = self.selection.selected() {
            let style = self.styles.style_for(entity.kind(), true);
            composer::restyle(&mut self.styled, entity.range(), &style);
        }
        self.invalidate_layout();
    }

    fn trim_displayed_urls(&mut self, maximum: usize) {
        if self.source.runs().len() > 1 {
            tracing::debug!(
                target: targets::REGISTRY,
                "styled text with several runs keeps its URLs untrimmed"
            );
            return;
        }
        if let Some(text) = trim_urls(self.source.text(), self.registry.all_mut(), maximum) {
            let attributes = self
                .source
                .attributes_at(0)
                .map(|(attributes, _)| attributes.clone())
                .unwrap_or_default();
            self.trimmed = Some(StyledText::new(text, attributes));
        }
    }

    fn apply_effects(&mut self, effects: Vec<SelectionEffect>, now: Instant) {
        let mut restyled = false;
        for effect in effects {
            match effect {
                SelectionEffect::Restyle {
                    range,
                    kind,
                    selected,
                } => {
                    let style = self.styles.style_for(&kind, selected);
                    composer::restyle(&mut self.styled, range, &style);
                    restyled = true;
                }
                SelectionEffect::Notify(entity) => {
                    tracing::debug!(
                        target: targets::SELECTION,
                        text = entity.primary_text(),
                        "entity selected"
                    );
                    self.entity_selected.emit(entity);
                }
                SelectionEffect::ScheduleRevert { generation } => {
                    self.cancel_pending_revert();
                    let id = self.timers.start_one_shot(now, self.revert_delay, generation);
                    tracing::trace!(target: targets::TIMER, generation, "revert scheduled");
                    self.pending_revert = Some((id, generation));
                }
            }
        }
        if restyled {
            self.invalidate_layout();
        }
    }

    /// Stop the pending revert if the selection it was scheduled for is gone.
    fn cancel_stale_revert(&mut self) {
        let Some((_, generation)) = self.pending_revert else {
            return;
        };
        let current = matches!(
            self.selection.state(),
            SelectionState::Releasing(selection) if selection.generation == generation
        );
        if !current {
            self.cancel_pending_revert();
        }
    }

    fn cancel_pending_revert(&mut self) {
        if let Some((id, generation)) = self.pending_revert.take()
            && self.timers.stop(id).is_ok()
        {
            tracing::trace!(target: targets::TIMER, generation, "revert cancelled");
        }
    }

    fn drop_selection(&mut self) {
        self.selection.reset();
        self.cancel_pending_revert();
        self.mouse_pressed = false;
    }
}

static_assertions::assert_impl_all!(ActiveLabel: Send, Sync);
