//! Selection state machine.
//!
//! Tracks which entity, if any, is currently pressed and turns touch phases
//! into a list of [`SelectionEffect`]s for the widget to carry out: restyle a
//! range, notify the observer, or schedule the deferred revert.
//!
//! The machine itself never touches text or timers, which keeps it testable
//! without a layout engine or a clock.
//!
//! # States
//!
//! ```text
//!            press E                 release
//!   Idle ─────────────▶ Pressed(E) ───────────▶ Releasing(E)
//!    ▲                     │  ▲                     │
//!    │   cancel / miss     │  └── press E again ────┤
//!    ├─────────────────────┘                        │
//!    └──────────── revert(generation of E) ─────────┘
//! ```
//!
//! Every entry into `Pressed` draws a fresh generation. A revert only applies
//! when its generation still matches the current selection, so a revert
//! scheduled by an earlier tap can never clear a newer selection.

use active_label_core::logging::targets;
use active_label_render::TextRange;

use crate::entity::{Entity, EntityKind};
use crate::events::TouchPhase;

/// The selected entity and the generation it was selected in.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub entity: Entity,
    pub generation: u64,
}

/// Current selection state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    /// Nothing is selected.
    #[default]
    Idle,
    /// An entity is held down.
    Pressed(Selection),
    /// The entity was released and its revert is scheduled.
    Releasing(Selection),
}

impl SelectionState {
    /// Get the tracked selection, if any.
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Self::Idle => None,
            Self::Pressed(selection) | Self::Releasing(selection) => Some(selection),
        }
    }
}

/// Work the widget must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEffect {
    /// Draw the range with its entity's selected or normal style.
    Restyle {
        range: TextRange,
        kind: EntityKind,
        selected: bool,
    },
    /// Report a tap on the entity.
    Notify(Entity),
    /// Schedule a revert for this generation after the revert delay.
    ScheduleRevert { generation: u64 },
}

/// Outcome of feeding one touch phase to the machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchResponse {
    /// Whether the label handled the touch. Unconsumed touches should be
    /// passed on to the host's default handling.
    pub consumed: bool,
    pub effects: Vec<SelectionEffect>,
}

impl TouchResponse {
    fn ignored(effects: Vec<SelectionEffect>) -> Self {
        Self {
            consumed: false,
            effects,
        }
    }

    fn consumed(effects: Vec<SelectionEffect>) -> Self {
        Self {
            consumed: true,
            effects,
        }
    }
}

/// The press/release/revert state machine.
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: SelectionState,
    next_generation: u64,
}

impl SelectionMachine {
    /// Create an idle machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The selected entity, pressed or releasing.
    pub fn selected(&self) -> Option<&Entity> {
        self.state.selection().map(|selection| &selection.entity)
    }

    /// Generation of the current selection.
    pub fn generation(&self) -> Option<u64> {
        self.state.selection().map(|selection| selection.generation)
    }

    /// Check whether nothing is selected.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, SelectionState::Idle)
    }

    /// Advance the machine with a touch phase and the entity under it.
    pub fn handle(&mut self, phase: TouchPhase, hit: Option<Entity>) -> TouchResponse {
        match phase {
            TouchPhase::Started | TouchPhase::Moved => match hit {
                Some(entity) => self.press(entity),
                None => TouchResponse::ignored(self.clear()),
            },
            TouchPhase::Ended => self.release(),
            TouchPhase::Cancelled => TouchResponse::ignored(self.clear()),
        }
    }

    /// Drop the selection immediately, e.g. because the text changed.
    pub fn reset(&mut self) -> Vec<SelectionEffect> {
        self.clear()
    }

    /// Apply a deferred revert scheduled for `generation`.
    ///
    /// Stale generations are ignored and produce no effects.
    pub fn revert(&mut self, generation: u64) -> Vec<SelectionEffect> {
        match &self.state {
            SelectionState::Releasing(selection) if selection.generation == generation => {
                self.clear()
            }
            _ => {
                tracing::trace!(target: targets::SELECTION, generation, "stale revert ignored");
                Vec::new()
            }
        }
    }

    fn press(&mut self, entity: Entity) -> TouchResponse {
        let mut effects = Vec::new();
        match std::mem::take(&mut self.state) {
            SelectionState::Pressed(current) if current.entity.same_range(&entity) => {
                self.state = SelectionState::Pressed(current);
                return TouchResponse::consumed(effects);
            }
            SelectionState::Releasing(current) if current.entity.same_range(&entity) => {
                let generation = self.bump_generation();
                tracing::debug!(
                    target: targets::SELECTION,
                    generation,
                    "releasing entity pressed again"
                );
                self.state = SelectionState::Pressed(Selection {
                    entity: current.entity,
                    generation,
                });
                return TouchResponse::consumed(effects);
            }
            SelectionState::Pressed(previous) | SelectionState::Releasing(previous) => {
                effects.push(restyle(&previous.entity, false));
            }
            SelectionState::Idle => {}
        }

        let generation = self.bump_generation();
        tracing::debug!(
            target: targets::SELECTION,
            generation,
            start = entity.range().start,
            length = entity.range().length,
            "entity pressed"
        );
        effects.push(restyle(&entity, true));
        self.state = SelectionState::Pressed(Selection { entity, generation });
        TouchResponse::consumed(effects)
    }

    fn release(&mut self) -> TouchResponse {
        match std::mem::take(&mut self.state) {
            SelectionState::Pressed(selection) => {
                tracing::debug!(
                    target: targets::SELECTION,
                    generation = selection.generation,
                    "entity released"
                );
                let effects = vec![
                    SelectionEffect::Notify(selection.entity.clone()),
                    SelectionEffect::ScheduleRevert {
                        generation: selection.generation,
                    },
                ];
                self.state = SelectionState::Releasing(selection);
                TouchResponse::consumed(effects)
            }
            other => {
                self.state = other;
                TouchResponse::ignored(Vec::new())
            }
        }
    }

    fn clear(&mut self) -> Vec<SelectionEffect> {
        match std::mem::take(&mut self.state) {
            SelectionState::Idle => Vec::new(),
            SelectionState::Pressed(selection) | SelectionState::Releasing(selection) => {
                tracing::debug!(
                    target: targets::SELECTION,
                    generation = selection.generation,
                    "selection cleared"
                );
                vec![restyle(&selection.entity, false)]
            }
        }
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation = self.next_generation.wrapping_add(1);
        self.next_generation
    }
}

fn restyle(entity: &Entity, selected: bool) -> SelectionEffect {
    SelectionEffect::Restyle {
        range: entity.range(),
        kind: entity.kind().clone(),
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> Entity {
        Entity::new(TextRange::new(6, 4), EntityKind::mention("@bob"))
    }

    fn news() -> Entity {
        Entity::new(TextRange::new(17, 5), EntityKind::hashtag("#news"))
    }

    fn scheduled_generation(response: &TouchResponse) -> u64 {
        response
            .effects
            .iter()
            .find_map(|effect| match effect {
                SelectionEffect::ScheduleRevert { generation } => Some(*generation),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_press_release_revert() {
        let mut machine = SelectionMachine::new();

        let pressed = machine.handle(TouchPhase::Started, Some(bob()));
        assert!(pressed.consumed);
        assert_eq!(
            pressed.effects,
            vec![SelectionEffect::Restyle {
                range: TextRange::new(6, 4),
                kind: EntityKind::mention("@bob"),
                selected: true,
            }]
        );
        assert!(matches!(machine.state(), SelectionState::Pressed(s) if s.entity == bob()));

        let released = machine.handle(TouchPhase::Ended, None);
        assert!(released.consumed);
        assert_eq!(released.effects[0], SelectionEffect::Notify(bob()));
        assert!(matches!(machine.state(), SelectionState::Releasing(_)));

        let reverted = machine.revert(scheduled_generation(&released));
        assert_eq!(reverted.len(), 1);
        assert!(machine.is_idle());
    }

    #[test]
    fn test_repeated_press_on_same_entity() {
        let mut machine = SelectionMachine::new();
        machine.handle(TouchPhase::Started, Some(bob()));
        let generation = machine.generation();

        let moved = machine.handle(TouchPhase::Moved, Some(bob()));
        assert!(moved.consumed);
        assert!(moved.effects.is_empty());
        assert_eq!(machine.generation(), generation);
    }

    #[test]
    fn test_moving_to_other_entity_swaps_selection() {
        let mut machine = SelectionMachine::new();
        machine.handle(TouchPhase::Started, Some(bob()));
        let moved = machine.handle(TouchPhase::Moved, Some(news()));

        assert!(moved.consumed);
        assert!(matches!(
            &moved.effects[..],
            [
                SelectionEffect::Restyle { selected: false, range: a, .. },
                SelectionEffect::Restyle { selected: true, range: b, .. },
            ] if *a == bob().range() && *b == news().range()
        ));
        assert_eq!(machine.selected(), Some(&news()));
    }

    #[test]
    fn test_moving_off_entity_clears() {
        let mut machine = SelectionMachine::new();
        machine.handle(TouchPhase::Started, Some(bob()));

        let moved = machine.handle(TouchPhase::Moved, None);
        assert!(!moved.consumed);
        assert_eq!(moved.effects.len(), 1);
        assert!(machine.is_idle());

        // Nothing is pressed any more, so the release is not ours.
        let released = machine.handle(TouchPhase::Ended, None);
        assert!(!released.consumed);
        assert!(released.effects.is_empty());
    }

    #[test]
    fn test_cancel_unstyles_without_notify() {
        let mut machine = SelectionMachine::new();
        machine.handle(TouchPhase::Started, Some(bob()));

        let cancelled = machine.handle(TouchPhase::Cancelled, None);
        assert!(!cancelled.consumed);
        assert!(
            !cancelled
                .effects
                .iter()
                .any(|e| matches!(e, SelectionEffect::Notify(_)))
        );
        assert!(machine.is_idle());
    }

    #[test]
    fn test_press_on_nothing_is_not_consumed() {
        let mut machine = SelectionMachine::new();
        let response = machine.handle(TouchPhase::Started, None);
        assert_eq!(response, TouchResponse::default());
    }

    #[test]
    fn test_double_tap_stale_revert_is_ignored() {
        let mut machine = SelectionMachine::new();

        machine.handle(TouchPhase::Started, Some(bob()));
        let first = scheduled_generation(&machine.handle(TouchPhase::Ended, None));

        machine.handle(TouchPhase::Started, Some(news()));
        let second = scheduled_generation(&machine.handle(TouchPhase::Ended, None));
        assert_ne!(first, second);

        assert!(machine.revert(first).is_empty());
        assert_eq!(machine.selected(), Some(&news()));

        assert_eq!(machine.revert(second).len(), 1);
        assert!(machine.is_idle());
    }

    #[test]
    fn test_retap_same_entity_while_releasing() {
        let mut machine = SelectionMachine::new();

        machine.handle(TouchPhase::Started, Some(bob()));
        let first = scheduled_generation(&machine.handle(TouchPhase::Ended, None));

        let again = machine.handle(TouchPhase::Started, Some(bob()));
        assert!(again.consumed);
        assert!(again.effects.is_empty());
        assert!(matches!(machine.state(), SelectionState::Pressed(_)));

        // The first tap's revert must not clear the held entity.
        assert!(machine.revert(first).is_empty());
        assert_eq!(machine.selected(), Some(&bob()));
    }

    #[test]
    fn test_reset() {
        let mut machine = SelectionMachine::new();
        assert!(machine.reset().is_empty());

        machine.handle(TouchPhase::Started, Some(bob()));
        assert_eq!(machine.reset().len(), 1);
        assert!(machine.is_idle());
    }
}
