//! Integration tests for the highlight, redaction and risk properties of the overlay

use maskwise::overlay::{
    annotate, classify, detect, redact, Entity, MatchStrategy, OverlayConfig, OverlayEngine,
    PiiType, RiskTier, ViewMode,
};
use test_case::test_case;

const SAMPLE: &str = "Patient John Johnson (SSN 123-45-6789)\nemail: john@example.com";

fn sample_entities() -> Vec<Entity> {
    vec![
        Entity::new("John Johnson", PiiType::Person, 0.95),
        Entity::new("123-45-6789", PiiType::Ssn, 0.99),
        Entity::new("john@example.com", PiiType::Email, 0.9),
    ]
}

#[test]
fn test_empty_entity_list_is_identity() {
    assert_eq!(annotate(SAMPLE, &[]), SAMPLE);
    assert_eq!(redact(SAMPLE, &[]), SAMPLE);
}

#[test]
fn test_absent_literals_leave_document_unchanged() {
    let document = "Nothing sensitive in this sentence.";
    let entities = vec![
        Entity::new("jane@corp.com", PiiType::Email, 0.9),
        Entity::new("Alice", PiiType::Person, 0.8),
    ];

    assert_eq!(annotate(document, &entities), document);
    assert_eq!(redact(document, &entities), document);

    let multi_line = "line one\nline two";
    assert_eq!(annotate(multi_line, &entities), multi_line);
    assert_eq!(redact(multi_line, &entities), multi_line);
}

#[test]
fn test_redaction_is_idempotent() {
    let once = redact(SAMPLE, &sample_entities());
    let twice = redact(once.as_str(), &[]);
    assert_eq!(once, twice);

    // Re-applying the same entities finds nothing left to mask
    let again = redact(once.as_str(), &sample_entities());
    assert_eq!(once, again);
}

#[test]
fn test_longest_literal_wins() {
    let entities = vec![
        Entity::new("John", PiiType::Person, 0.8),
        Entity::new("John Johnson", PiiType::Person, 0.95),
    ];

    let masked = redact("John Johnson", &entities);
    assert_eq!(masked, "[PERSON]");
    assert!(!masked.as_str().contains("son"));
}

#[test]
fn test_whole_token_replacement_only() {
    let entities = vec![Entity::new("email@example.com", PiiType::Email, 0.9)];
    assert_eq!(
        redact("email@example.com and notanemail@x", &entities),
        "[EMAIL] and notanemail@x"
    );
}

#[test]
fn test_sample_document_masks_every_entity() {
    let masked = redact(SAMPLE, &sample_entities());
    assert_eq!(
        masked,
        "Patient [PERSON] (SSN [SSN])\nemail: [EMAIL]"
    );
}

#[test]
fn test_highlight_keeps_literals_and_converts_newlines() {
    let highlighted = annotate(SAMPLE, &sample_entities());
    let html = highlighted.as_str();

    assert!(html.contains(
        r#"<span class="pii-highlight pii-SSN" title="SSN (99.0% confidence)">123-45-6789</span>"#
    ));
    assert!(html.contains("<br>"));
    assert!(!html.contains('\n'));
}

#[test]
fn test_confidence_renders_with_one_decimal() {
    let entities = vec![Entity::new("jane@corp.com", PiiType::Email, 0.873)];
    let highlighted = annotate("Mail jane@corp.com", &entities);
    assert!(highlighted.as_str().contains("87.3%"));
}

#[test]
fn test_unknown_type_renders_generically() {
    let entities = vec![Entity::new("X1234567", "PASSPORT", 0.7)];

    assert_eq!(redact("Passport X1234567", &entities), "Passport [PII]");
    assert!(annotate("Passport X1234567", &entities)
        .as_str()
        .contains("pii-generic"));
}

#[test_case(&[PiiType::Ssn], RiskTier::High; "ssn is high")]
#[test_case(&[PiiType::Email], RiskTier::Medium; "email is medium")]
#[test_case(&[PiiType::Person], RiskTier::Low; "person is low")]
#[test_case(&[PiiType::Ssn, PiiType::Person], RiskTier::High; "highest tier wins")]
#[test_case(&[PiiType::CreditCard, PiiType::Phone], RiskTier::High; "card beats phone")]
#[test_case(&[PiiType::Date, PiiType::Url], RiskTier::Low; "other types are low")]
#[test_case(&[], RiskTier::Unknown; "empty set has no risk")]
fn test_classify(types: &[PiiType], expected: RiskTier) {
    assert_eq!(classify(types.iter().copied()), expected);
}

#[test]
fn test_fallback_detect_and_redact() {
    let document = "Contact me at jane@corp.com or 555-123-4567.";
    let entities = detect(document).unwrap();

    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].text, "jane@corp.com");
    assert_eq!(entities[0].pii_type(), Some(PiiType::Email));
    assert_eq!(entities[0].confidence, 0.9);
    assert_eq!(entities[1].text, "555-123-4567");
    assert_eq!(entities[1].pii_type(), Some(PiiType::Phone));
    assert_eq!(entities[1].confidence, 0.9);

    assert_eq!(redact(document, &entities), "Contact me at [EMAIL] or [PHONE].");
}

#[test]
fn test_offsets_strategy_matches_literal_strategy_for_disjoint_spans() {
    let document = "Contact me at jane@corp.com or 555-123-4567.";
    let entities = detect(document).unwrap();

    let mut config = OverlayConfig::default();
    config.render.strategy = MatchStrategy::Offsets;
    let offsets = OverlayEngine::new(config).unwrap();
    let literal = OverlayEngine::new(OverlayConfig::default()).unwrap();

    assert_eq!(
        offsets.redact(document, &entities),
        literal.redact(document, &entities)
    );
    assert_eq!(
        offsets.annotate(document, &entities),
        literal.annotate(document, &entities)
    );
}

#[test]
fn test_duplicate_spans_differ_only_in_highlighting() {
    let entities = vec![
        Entity::with_position("Ann", PiiType::Person, 0.8, 0, 3),
        Entity::with_position("Ann", PiiType::Organization, 0.9, 0, 3),
    ];

    let mut config = OverlayConfig::default();
    config.render.strategy = MatchStrategy::Offsets;
    let offsets = OverlayEngine::new(config).unwrap();
    let literal = OverlayEngine::new(OverlayConfig::default()).unwrap();

    assert_eq!(offsets.redact("Ann", &entities), "[PERSON]");
    assert_eq!(literal.redact("Ann", &entities), "[PERSON]");

    let single = offsets.annotate("Ann", &entities);
    assert!(single.as_str().contains("pii-PERSON"));
    assert!(!single.as_str().contains("pii-ORGANIZATION"));

    let nested = literal.annotate("Ann", &entities);
    assert!(nested.as_str().starts_with(r#"<span class="pii-highlight pii-PERSON""#));
    assert!(nested.as_str().contains("pii-ORGANIZATION"));
}

#[test]
fn test_view_toggle_renders_both_views() {
    let engine = OverlayEngine::new(OverlayConfig::default()).unwrap();
    let analysis = engine.analyze(
        "Hi John",
        Some(maskwise::overlay::DetectorResponse::from_entities(vec![
            Entity::new("John", PiiType::Person, 0.8),
        ])),
    );

    let highlighted = engine.render(&analysis, ViewMode::Highlighted);
    let masked = engine.render(&analysis, highlighted.view_mode().toggled());

    assert!(highlighted.as_str().contains("pii-PERSON"));
    assert_eq!(masked.as_str(), "Hi [PERSON]");
    assert_eq!(analysis.risk_tier(), RiskTier::Low);
}
