//! Masked view

use super::{apply, SpanRenderer};
use crate::overlay::config::MatchStrategy;
use crate::overlay::models::{Entity, MaskedText};

/// Placeholder token used for unknown entity types
pub const UNKNOWN_PLACEHOLDER: &str = "PII";

/// Placeholder token format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderStyle {
    /// `[EMAIL]`, `[CREDIT_CARD]`; full-detector output
    #[default]
    Typed,
    /// `[EMAIL_demo0]`; fallback output, numbered by detection order
    Numbered,
}

/// Replaces each resolved entity with a type placeholder
///
/// Placeholders carry neither the original value nor the confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Redactor {
    style: PlaceholderStyle,
    strategy: MatchStrategy,
}

impl Redactor {
    /// Create a redactor with the given placeholder style
    pub fn new(style: PlaceholderStyle) -> Self {
        Self {
            style,
            strategy: MatchStrategy::Literal,
        }
    }

    /// Use a different span location strategy
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Placeholder style in use
    pub fn style(&self) -> PlaceholderStyle {
        self.style
    }

    /// Mask every resolved entity occurrence
    pub fn redact(&self, document: &str, entities: &[Entity]) -> MaskedText {
        if entities.is_empty() {
            return MaskedText::new(document);
        }

        let mut renderer = *self;
        let (masked, rendered) = apply(document, entities, self.strategy, &mut renderer);
        tracing::debug!(rendered, style = ?self.style, "Redacted document");
        MaskedText::new(masked)
    }
}

impl SpanRenderer for Redactor {
    fn render(&mut self, entity: &Entity, index: usize) -> String {
        let tag = match entity.pii_type() {
            Some(t) => t.label(),
            None => {
                tracing::warn!(
                    entity_type = %entity.entity_type,
                    "Unknown PII type, using generic placeholder"
                );
                UNKNOWN_PLACEHOLDER
            }
        };

        match self.style {
            PlaceholderStyle::Typed => format!("[{tag}]"),
            PlaceholderStyle::Numbered => format!("[{tag}_demo{index}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::models::PiiType;
    use test_case::test_case;

    #[test_case(PiiType::CreditCard, "[CREDIT_CARD]" ; "underscores preserved")]
    #[test_case(PiiType::Email, "[EMAIL]" ; "email")]
    #[test_case(PiiType::IpAddress, "[IP_ADDRESS]" ; "ip address")]
    fn test_typed_placeholder(pii_type: PiiType, expected: &str) {
        let entity = Entity::new("value", pii_type, 0.9);
        assert_eq!(Redactor::default().redact("a value", &[entity]), format!("a {expected}").as_str());
    }

    #[test]
    fn test_numbered_placeholder_uses_detection_index() {
        let entities = vec![
            Entity::new("jane@corp.com", PiiType::Email, 0.9),
            Entity::new("555-123-4567", PiiType::Phone, 0.9),
        ];
        let out = Redactor::new(PlaceholderStyle::Numbered)
            .redact("jane@corp.com / 555-123-4567", &entities);
        assert_eq!(out, "[EMAIL_demo0] / [PHONE_demo1]");
    }

    #[test]
    fn test_unknown_type_redacts_generically() {
        let entities = vec![Entity::new("X-99", "PASSPORT", 0.7)];
        assert_eq!(Redactor::default().redact("id X-99", &entities), "id [PII]");
    }

    #[test]
    fn test_longest_first_leaves_no_partial_mask() {
        let entities = vec![
            Entity::new("John", PiiType::Person, 0.8),
            Entity::new("John Johnson", PiiType::Person, 0.95),
        ];
        assert_eq!(Redactor::default().redact("John Johnson", &entities), "[PERSON]");
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let entities = vec![Entity::new("Ann", PiiType::Person, 0.8)];
        let once = Redactor::default().redact("Ann\nAnn", &entities);
        let twice = Redactor::default().redact(once.as_str(), &[]);
        assert_eq!(once, twice);
        assert_eq!(once, "[PERSON]\n[PERSON]");
    }
}
