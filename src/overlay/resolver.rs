//! Overlap resolution for detected entities
//!
//! Literal mode orders entities longest-first and relies on sequential
//! substitution: once a long literal has been replaced, its shorter
//! substrings are no longer available at that location. This is a heuristic.
//! A shorter literal can still match inside output produced by an earlier
//! pass (for example inside a highlight wrapper), and that behavior is kept.
//!
//! Offset mode is the interval alternative, usable only when every entity
//! carries offsets that agree with the document.

use crate::overlay::models::Entity;
use std::cmp::Reverse;

/// An entity together with its position in detection order
pub type Indexed<'a> = (usize, &'a Entity);

/// Order entities longest literal first; ties keep detection order
pub fn longest_first(entities: &[Entity]) -> Vec<Indexed<'_>> {
    let mut ordered: Vec<Indexed<'_>> = entities.iter().enumerate().collect();
    // sort_by_key is stable
    ordered.sort_by_key(|(_, entity)| Reverse(entity.literal_len()));
    ordered
}

/// Check that an entity's offsets are usable against `document`
fn has_valid_span(document: &str, entity: &Entity) -> bool {
    match entity.span() {
        Some((start, end)) if start < end => {
            document.get(start..end) == Some(entity.text.as_str())
        }
        _ => false,
    }
}

/// Resolve entities as non-overlapping intervals
///
/// Sorted by start, longer spans first on ties, then detection order. Any span
/// that overlaps an already accepted one is dropped, which also removes
/// exact duplicates (the first detection wins). Returns `None` when any
/// entity lacks offsets or its offsets do not select its literal, in which
/// case callers use [`longest_first`] instead.
///
/// For duplicate spans this differs from literal substitution in the
/// highlighted view: literal passes nest later duplicates inside the first
/// wrapper, while offsets render the first detection alone. Masked output is
/// the same either way since the first placeholder hides the literal.
pub fn non_overlapping<'a>(document: &str, entities: &'a [Entity]) -> Option<Vec<Indexed<'a>>> {
    if !entities.iter().all(|e| has_valid_span(document, e)) {
        return None;
    }

    let mut ordered: Vec<Indexed<'a>> = entities.iter().enumerate().collect();
    ordered.sort_by_key(|(index, entity)| {
        let (start, end) = entity.span().unwrap_or_default();
        (start, Reverse(end - start), *index)
    });

    let mut accepted: Vec<Indexed<'a>> = Vec::with_capacity(ordered.len());
    let mut cursor = 0;
    for (index, entity) in ordered {
        let (start, end) = entity.span().unwrap_or_default();
        if start < cursor {
            tracing::debug!(index, start, end, "Dropping overlapping span");
            continue;
        }
        cursor = end;
        accepted.push((index, entity));
    }

    Some(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::models::PiiType;

    fn indices(ordered: &[Indexed<'_>]) -> Vec<usize> {
        ordered.iter().map(|(i, _)| *i).collect()
    }

    #[test]
    fn test_longest_first_is_stable() {
        let entities = vec![
            Entity::new("John", PiiType::Person, 0.8),
            Entity::new("John Johnson", PiiType::Person, 0.95),
            Entity::new("Jane", PiiType::Person, 0.7),
            Entity::new("Acme", PiiType::Organization, 0.6),
        ];
        assert_eq!(indices(&longest_first(&entities)), vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_length_counts_characters() {
        // 4 chars, 8 bytes vs 5 chars, 5 bytes
        let entities = vec![
            Entity::new("Øyvä", PiiType::Person, 0.8),
            Entity::new("Bjorn", PiiType::Person, 0.8),
        ];
        assert_eq!(indices(&longest_first(&entities)), vec![1, 0]);
    }

    #[test]
    fn test_non_overlapping_drops_nested() {
        let document = "John Johnson";
        let entities = vec![
            Entity::with_position("John", PiiType::Person, 0.8, 0, 4),
            Entity::with_position("John Johnson", PiiType::Person, 0.95, 0, 12),
        ];
        let resolved = non_overlapping(document, &entities).unwrap();
        assert_eq!(indices(&resolved), vec![1]);
    }

    #[test]
    fn test_non_overlapping_keeps_disjoint_in_document_order() {
        let document = "a@b.io then 555-123-4567";
        let entities = vec![
            Entity::with_position("555-123-4567", PiiType::Phone, 0.9, 12, 24),
            Entity::with_position("a@b.io", PiiType::Email, 0.9, 0, 6),
        ];
        let resolved = non_overlapping(document, &entities).unwrap();
        assert_eq!(indices(&resolved), vec![1, 0]);
    }

    #[test]
    fn test_non_overlapping_requires_offsets() {
        let document = "John";
        let missing = vec![Entity::new("John", PiiType::Person, 0.8)];
        assert!(non_overlapping(document, &missing).is_none());

        let stale = vec![Entity::with_position("John", PiiType::Person, 0.8, 1, 5)];
        assert!(non_overlapping(document, &stale).is_none());
    }
}
