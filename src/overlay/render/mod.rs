//! Rendering passes over a document
//!
//! Every view (highlighted, masked, protected prompt, vault-masked) is the
//! same pass with a different [`SpanRenderer`]: entities are resolved, then
//! each resolved span is replaced with whatever the renderer produces.

pub mod annotator;
pub mod redactor;

pub use annotator::Annotator;
pub use redactor::{PlaceholderStyle, Redactor};

use crate::logging::pii_fingerprint;
use crate::overlay::config::MatchStrategy;
use crate::overlay::matcher::SpanMatcher;
use crate::overlay::models::{Entity, HighlightedText, MaskedText};
use crate::overlay::resolver::{longest_first, non_overlapping};

/// Produces the replacement for one resolved entity
pub trait SpanRenderer {
    /// Replacement text for `entity`; `index` is its position in detection order
    ///
    /// Only called when the entity actually matches the current document.
    fn render(&mut self, entity: &Entity, index: usize) -> String;
}

/// Longest-first sequential substitution on the current string
///
/// Returns the rendered text and the number of entities that matched.
pub fn apply_literal<R>(document: &str, entities: &[Entity], renderer: &mut R) -> (String, usize)
where
    R: SpanRenderer + ?Sized,
{
    let mut current = document.to_string();
    let mut rendered = 0;

    for (index, entity) in longest_first(entities) {
        let matcher = match SpanMatcher::new(&entity.text) {
            Ok(matcher) => matcher,
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping entity");
                continue;
            }
        };

        if !matcher.is_match(&current) {
            tracing::trace!(
                index,
                fingerprint = %pii_fingerprint(&entity.text),
                "Entity not found in document"
            );
            continue;
        }

        let replacement = renderer.render(entity, index);
        current = matcher.replace_all(&current, &replacement).into_owned();
        rendered += 1;
    }

    (current, rendered)
}

/// Check whether any entity literal occurs in `document` as a whole token
///
/// Literal substitution renders at least one entity exactly when this holds.
pub fn occurs_in(document: &str, entities: &[Entity]) -> bool {
    entities.iter().any(|entity| {
        SpanMatcher::new(&entity.text).is_ok_and(|matcher| matcher.is_match(document))
    })
}

/// Check that every whole-token occurrence of every literal lies inside
/// some entity span
fn spans_cover_all_occurrences(document: &str, entities: &[Entity]) -> bool {
    let spans: Vec<(usize, usize)> = entities.iter().filter_map(Entity::span).collect();

    entities.iter().all(|entity| match SpanMatcher::new(&entity.text) {
        Ok(matcher) => matcher.find_all(document).iter().all(|occurrence| {
            spans
                .iter()
                .any(|&(start, end)| start <= occurrence.start && occurrence.end <= end)
        }),
        Err(_) => false,
    })
}

/// Single left-to-right rebuild over non-overlapping offset intervals
///
/// Returns `None` when the entities cannot be resolved by offsets, or when a
/// literal also occurs outside every span (rendering by offsets would leave
/// that occurrence untouched).
pub fn apply_offsets<R>(
    document: &str,
    entities: &[Entity],
    renderer: &mut R,
) -> Option<(String, usize)>
where
    R: SpanRenderer + ?Sized,
{
    let resolved = non_overlapping(document, entities)?;
    if !spans_cover_all_occurrences(document, entities) {
        return None;
    }

    let resolved_count = resolved.len();
    let mut output = String::with_capacity(document.len());
    let mut cursor = 0;
    for (index, entity) in resolved {
        let (start, end) = entity.span()?;
        output.push_str(document.get(cursor..start)?);
        output.push_str(&renderer.render(entity, index));
        cursor = end;
    }
    output.push_str(document.get(cursor..)?);

    Some((output, resolved_count))
}

/// Apply `renderer` with the given strategy
///
/// The offsets strategy falls back to literal substitution when any entity
/// lacks usable offsets. The count is the number of entities rendered.
pub fn apply<R>(
    document: &str,
    entities: &[Entity],
    strategy: MatchStrategy,
    renderer: &mut R,
) -> (String, usize)
where
    R: SpanRenderer + ?Sized,
{
    if strategy == MatchStrategy::Offsets {
        if let Some(rendered) = apply_offsets(document, entities, renderer) {
            return rendered;
        }
        tracing::debug!("Entity offsets unusable, falling back to literal matching");
    }
    apply_literal(document, entities, renderer)
}

/// Highlight `entities` in `document` for an HTML target
pub fn annotate(document: &str, entities: &[Entity]) -> HighlightedText {
    Annotator::default().annotate(document, entities)
}

/// Replace `entities` in `document` with `[TYPE]` placeholders
pub fn redact(document: &str, entities: &[Entity]) -> MaskedText {
    Redactor::default().redact(document, entities)
}
