//! The ordered set of entities attached to the displayed text.
//!
//! Entities are kept in the order the tokenizer produced them. That order is
//! significant twice: the styling pass applies entities in order, so a later
//! entity wins where ranges overlap, and index lookup returns the first match
//! in order.

use active_label_core::logging::targets;
use active_label_core::{LabelError, Result};

use crate::entity::Entity;

/// Ordered collection of the current text's entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entity with `entities`, keeping their order.
    pub fn set_entities(&mut self, entities: Vec<Entity>) {
        tracing::debug!(
            target: targets::REGISTRY,
            previous = self.entities.len(),
            count = entities.len(),
            "entities replaced"
        );
        self.entities = entities;
    }

    /// All entities in insertion order.
    pub fn all(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn all_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Iterate over the entities in order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Get the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check whether no entities are installed.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// The first entity, in registry order, whose range covers `index`.
    ///
    /// The upper bound is inclusive: an entity covering `[s, s + n)` also
    /// answers for index `s + n`. Whether that one-character tolerance is an
    /// intended touch affordance or an off-by-one is unresolved; it is kept
    /// for compatibility with existing hosts. When ranges overlap, the
    /// earliest entity in the list wins, not the smallest or innermost.
    pub fn entity_at(&self, index: usize) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.range().contains_inclusive_end(index))
    }

    /// Check that every range lies within a text of `text_len` characters.
    pub fn validate(&self, text_len: usize) -> Result<()> {
        match self.entities.iter().find(|e| e.range().end() > text_len) {
            Some(entity) => {
                let range = entity.range();
                Err(LabelError::range_out_of_bounds(range.start, range.end(), text_len))
            }
            None => Ok(()),
        }
    }

    /// Clamp every range to a text of `text_len` characters.
    ///
    /// Entities that start past the end are dropped. Returns how many
    /// entities were changed or removed.
    pub fn clamp_to(&mut self, text_len: usize) -> usize {
        let mut adjusted = 0;
        self.entities.retain_mut(|entity| {
            let range = entity.range();
            match range.clamp_to(text_len) {
                Some(clamped) if clamped == range => true,
                Some(clamped) => {
                    tracing::warn!(
                        target: targets::REGISTRY,
                        start = range.start,
                        end = range.end(),
                        text_len,
                        "entity range clamped to text"
                    );
                    entity.set_range(clamped);
                    adjusted += 1;
                    true
                }
                None => {
                    tracing::warn!(
                        target: targets::REGISTRY,
                        start = range.start,
                        end = range.end(),
                        text_len,
                        "entity outside text dropped"
                    );
                    adjusted += 1;
                    false
                }
            }
        });
        adjusted
    }
}

impl FromIterator<Entity> for EntityRegistry {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}
