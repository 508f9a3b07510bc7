//! Highlighted view

use super::{apply, SpanRenderer};
use crate::overlay::config::{MatchStrategy, RenderTarget};
use crate::overlay::models::{Entity, HighlightedText};

/// Wraps each resolved entity in a highlight element
///
/// The wrapper carries the literal unchanged, a `pii-<TYPE>` category class
/// (`pii-generic` for unknown types) and a tooltip such as
/// `EMAIL (90.0% confidence)`. Document text outside the wrappers is passed
/// through as is; it is not HTML-escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Annotator {
    target: RenderTarget,
    strategy: MatchStrategy,
}

impl Annotator {
    /// Create an annotator for a render target
    pub fn new(target: RenderTarget) -> Self {
        Self {
            target,
            strategy: MatchStrategy::Literal,
        }
    }

    /// Use a different span location strategy
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Highlight every resolved entity occurrence
    ///
    /// When no entity occurs in the document it is returned untouched.
    /// Otherwise newlines are converted to the target's line-break marker
    /// after substitution.
    pub fn annotate(&self, document: &str, entities: &[Entity]) -> HighlightedText {
        if entities.is_empty() {
            return HighlightedText::new(document);
        }

        let mut renderer = *self;
        let (highlighted, rendered) = apply(document, entities, self.strategy, &mut renderer);
        tracing::debug!(rendered, target = %self.target, "Annotated document");

        match self.target {
            RenderTarget::Html if rendered > 0 => {
                HighlightedText::new(highlighted.replace('\n', "<br>"))
            }
            _ => HighlightedText::new(highlighted),
        }
    }

    /// Tooltip text for one entity
    pub fn tooltip(entity: &Entity) -> String {
        format!(
            "{} ({} confidence)",
            entity.entity_type.label(),
            entity.confidence_percent()
        )
    }
}

impl SpanRenderer for Annotator {
    fn render(&mut self, entity: &Entity, _index: usize) -> String {
        if entity.entity_type.is_unknown() {
            tracing::warn!(
                entity_type = %entity.entity_type,
                "Unknown PII type, using generic highlight"
            );
        }

        let category = entity.entity_type.display_category();
        format!(
            r#"<span class="pii-highlight {}" title="{}">{}</span>"#,
            category.css_class,
            escape_attribute(&Self::tooltip(entity)),
            entity.text
        )
    }
}

/// Escape a value for use inside a double-quoted attribute
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::models::PiiType;

    #[test]
    fn test_annotate_wraps_entity() {
        let entities = vec![Entity::new("jane@corp.com", PiiType::Email, 0.873)];
        let out = Annotator::default().annotate("Mail jane@corp.com now", &entities);
        assert_eq!(
            out,
            r#"Mail <span class="pii-highlight pii-EMAIL" title="EMAIL (87.3% confidence)">jane@corp.com</span> now"#
        );
    }

    #[test]
    fn test_empty_entities_is_identity() {
        let document = "line one\nline two";
        assert_eq!(Annotator::default().annotate(document, &[]), document);
    }

    #[test]
    fn test_absent_entities_keep_newlines() {
        let document = "line one\nline two";
        let entities = vec![Entity::new("zzz@x.io", PiiType::Email, 0.9)];
        assert_eq!(Annotator::default().annotate(document, &entities), document);
    }

    #[test]
    fn test_newlines_follow_target() {
        let entities = vec![Entity::new("Bob", PiiType::Person, 0.9)];
        let html = Annotator::new(RenderTarget::Html).annotate("Hi\nBob", &entities);
        assert!(html.as_str().starts_with("Hi<br><span"));

        let text = Annotator::new(RenderTarget::Text).annotate("Hi\nBob", &entities);
        assert!(text.as_str().starts_with("Hi\n<span"));
    }

    #[test]
    fn test_unknown_type_uses_generic_category() {
        let entities = vec![Entity::new("X1", "PASS\"PORT", 0.5)];
        let out = Annotator::default().annotate("id X1", &entities);
        assert!(out.as_str().contains(r#"class="pii-highlight pii-generic""#));
        assert!(out.as_str().contains("PASS&quot;PORT (50.0% confidence)"));
    }

    #[test]
    fn test_duplicate_literal_nests_later_detection() {
        // Both wrap "Ann"; the second pass wraps inside the first wrapper
        let entities = vec![
            Entity::new("Ann", PiiType::Person, 0.6),
            Entity::new("Ann", PiiType::Organization, 0.9),
        ];
        let out = Annotator::default().annotate("Ann", &entities);
        let inner = r#"<span class="pii-highlight pii-ORGANIZATION" title="ORGANIZATION (90.0% confidence)">Ann</span>"#;
        assert!(out.as_str().contains(inner));
        assert!(out.as_str().starts_with(r#"<span class="pii-highlight pii-PERSON""#));
    }
}
