//! Tokenizer collaborator.
//!
//! The label does not find entities itself. A host supplies an
//! [`EntityDetector`] that scans the text and returns entities in order,
//! with non-overlapping character ranges.

use crate::entity::Entity;

/// Finds entities in displayed text.
pub trait EntityDetector: Send + Sync {
    /// Scan `text` and return its entities in text order.
    fn detect(&self, text: &str) -> Vec<Entity>;
}

impl<F> EntityDetector for F
where
    F: Fn(&str) -> Vec<Entity> + Send + Sync,
{
    fn detect(&self, text: &str) -> Vec<Entity> {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use active_label_render::TextRange;

    /// Treats every word starting with `#` as a hashtag.
    fn hashtags(text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut offset = 0;
        for word in text.split(' ') {
            let len = word.chars().count();
            if word.starts_with('#') && len > 1 {
                entities.push(Entity::new(TextRange::new(offset, len), EntityKind::hashtag(word)));
            }
            offset += len + 1;
        }
        entities
    }

    #[test]
    fn test_closure_detector() {
        let detector: &dyn EntityDetector = &hashtags;
        let found = detector.detect("a #b c #dd");
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].range(), TextRange::new(7, 3));
        assert_eq!(found[1].primary_text(), "#dd");
    }
}
