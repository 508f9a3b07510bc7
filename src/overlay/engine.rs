//! Overlay engine
//!
//! [`OverlayEngine`] ties detection results to the rendered views:
//!
//! - **Detector**: the external response when there is one, otherwise the
//!   in-process fallback detector
//! - **Renderers**: annotator and redactor, configured from [`OverlayConfig`]
//! - **Risk**: derived from the analysis on demand
//!
//! # Examples
//!
//! ```
//! use maskwise::overlay::{OverlayConfig, OverlayEngine, ViewMode};
//!
//! let engine = OverlayEngine::new(OverlayConfig::default())?;
//! let analysis = engine.analyze_offline("Contact me at jane@corp.com or 555-123-4567.");
//!
//! assert!(analysis.is_fallback());
//! assert_eq!(analysis.masked_text, "Contact me at [EMAIL_demo0] or [PHONE_demo1].");
//!
//! let highlighted = engine.render(&analysis, ViewMode::Highlighted);
//! assert!(highlighted.as_str().contains("pii-EMAIL"));
//! # Ok::<(), maskwise::domain::MaskwiseError>(())
//! ```

use crate::domain::Result;
use crate::overlay::{
    config::{OverlayConfig, RenderTarget},
    detector::{fallback::FALLBACK_NOTICE, FallbackDetector, PiiDetector},
    models::{
        AnalysisResult, DetectionMode, DetectorResponse, Entity, HighlightedText, MaskedText,
        RenderedDocument, ViewMode,
    },
    protector::{PromptProtector, ProtectedPrompt},
    render::{occurs_in, Annotator, PlaceholderStyle, Redactor},
};
use crate::{log_analysis_complete, log_fallback_engaged};
use std::sync::Arc;

/// Main overlay engine
///
/// Stateless apart from configuration; every call is a pure function of its
/// arguments, so the engine can be shared behind an `Arc`.
pub struct OverlayEngine {
    config: OverlayConfig,
    detector: Arc<dyn PiiDetector>,
}

impl OverlayEngine {
    /// Create a new overlay engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pattern
    /// library cannot be loaded.
    pub fn new(config: OverlayConfig) -> Result<Self> {
        config.validate()?;

        let detector: Arc<dyn PiiDetector> = Arc::new(FallbackDetector::from_config(&config.fallback)?);

        Ok(Self { config, detector })
    }

    /// Replace the in-process detector
    pub fn with_detector(mut self, detector: Arc<dyn PiiDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Get the engine configuration
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Annotator for the configured target and strategy
    pub fn annotator(&self) -> Annotator {
        Annotator::new(self.config.render.target).with_strategy(self.config.render.strategy)
    }

    /// Redactor with the given placeholder style and the configured strategy
    pub fn redactor(&self, style: PlaceholderStyle) -> Redactor {
        Redactor::new(style).with_strategy(self.config.render.strategy)
    }

    /// Highlighted view of `document`
    pub fn annotate(&self, document: &str, entities: &[Entity]) -> HighlightedText {
        self.annotator().annotate(document, entities)
    }

    /// Masked view of `document` with `[TYPE]` placeholders
    pub fn redact(&self, document: &str, entities: &[Entity]) -> MaskedText {
        self.redactor(PlaceholderStyle::Typed).redact(document, entities)
    }

    /// Run the in-process detector
    pub fn detect(&self, document: &str) -> Vec<Entity> {
        self.detector.detect(document)
    }

    /// Build an analysis from an external detector response
    pub fn analyze_response(&self, document: &str, response: DetectorResponse) -> AnalysisResult {
        let entities = response.entities;
        let masked = self.redact(document, &entities);

        let result = AnalysisResult::new(
            document.to_string(),
            masked.into_string(),
            entities,
            DetectionMode::Full,
        );
        log_analysis_complete!(result);
        result
    }

    /// Build an analysis with the in-process detector
    ///
    /// Fallback results use numbered placeholders and carry a notice so they
    /// cannot be confused with full-detector output.
    pub fn analyze_offline(&self, document: &str) -> AnalysisResult {
        let entities = self.detector.detect(document);
        let mode = self.detector.mode();

        let (masked, suggestions) = match mode {
            DetectionMode::Fallback => (
                self.redactor(PlaceholderStyle::Numbered).redact(document, &entities),
                vec![FALLBACK_NOTICE.to_string()],
            ),
            DetectionMode::Full => (self.redact(document, &entities), Vec::new()),
        };

        let result = AnalysisResult::new(document.to_string(), masked.into_string(), entities, mode)
            .with_suggestions(suggestions);
        log_analysis_complete!(result);
        result
    }

    /// Analyze with the external response when available, else offline
    pub fn analyze(&self, document: &str, response: Option<DetectorResponse>) -> AnalysisResult {
        match response {
            Some(response) => self.analyze_response(document, response),
            None => {
                log_fallback_engaged!("no detector response");
                self.analyze_offline(document)
            }
        }
    }

    /// Render one view of an analysis
    pub fn render(&self, analysis: &AnalysisResult, view: ViewMode) -> RenderedDocument {
        match view {
            ViewMode::Highlighted => RenderedDocument::Highlighted(
                self.annotate(&analysis.original_text, &analysis.detected_entities),
            ),
            ViewMode::Masked => {
                let masked = match self.config.render.target {
                    RenderTarget::Html if masked_any(analysis) => {
                        analysis.masked_text.replace('\n', "<br>")
                    }
                    _ => analysis.masked_text.clone(),
                };
                RenderedDocument::Masked(MaskedText::new(masked))
            }
        }
    }

    /// Prompt protector configured from this engine
    pub fn protector(&self) -> PromptProtector {
        PromptProtector::from_config(&self.config.protect)
    }

    /// Protected-prompt view of `prompt`
    pub fn protect(&self, prompt: &str, entities: &[Entity]) -> ProtectedPrompt {
        self.protector().protect(prompt, entities)
    }
}

/// Whether masking replaced anything in the analyzed document
fn masked_any(analysis: &AnalysisResult) -> bool {
    analysis.masked_text != analysis.original_text
        || occurs_in(&analysis.original_text, &analysis.detected_entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::config::MatchStrategy;
    use crate::overlay::models::PiiType;
    use crate::overlay::risk::RiskTier;

    struct FixedDetector(Vec<Entity>);

    impl PiiDetector for FixedDetector {
        fn detect(&self, _document: &str) -> Vec<Entity> {
            self.0.clone()
        }

        fn mode(&self) -> DetectionMode {
            DetectionMode::Full
        }
    }

    #[test]
    fn test_analyze_response_uses_typed_placeholders() {
        let engine = OverlayEngine::new(OverlayConfig::default()).unwrap();
        let response = DetectorResponse::from_entities(vec![
            Entity::new("123-45-6789", PiiType::Ssn, 0.95),
            Entity::new("Maria", PiiType::Person, 0.85),
        ]);
        let result = engine.analyze_response("Maria 123-45-6789", response);

        assert_eq!(result.masked_text, "[PERSON] [SSN]");
        assert_eq!(result.mode, DetectionMode::Full);
        assert_eq!(result.risk_tier(), RiskTier::High);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_analyze_without_response_falls_back() {
        let engine = OverlayEngine::new(OverlayConfig::default()).unwrap();
        let result = engine.analyze("Write to jane@corp.com", None);

        assert!(result.is_fallback());
        assert_eq!(result.masked_text, "Write to [EMAIL_demo0]");
        assert_eq!(result.suggestions, vec![FALLBACK_NOTICE.to_string()]);
    }

    #[test]
    fn test_injected_detector_reports_full_mode() {
        let detector = FixedDetector(vec![Entity::new("Acme", PiiType::Organization, 0.8)]);
        let engine = OverlayEngine::new(OverlayConfig::default())
            .unwrap()
            .with_detector(Arc::new(detector));
        let result = engine.analyze_offline("Acme rocks");

        assert_eq!(result.mode, DetectionMode::Full);
        assert_eq!(result.masked_text, "[ORGANIZATION] rocks");
    }

    #[test]
    fn test_render_masked_view_line_breaks() {
        let engine = OverlayEngine::new(OverlayConfig::default()).unwrap();
        let result = engine.analyze_offline("a@b.io\nthanks");

        let masked = engine.render(&result, ViewMode::Masked);
        assert_eq!(masked.as_str(), "[EMAIL_demo0]<br>thanks");
        assert_eq!(masked.view_mode(), ViewMode::Masked);

        let empty = engine.analyze_offline("no pii\nhere");
        assert_eq!(engine.render(&empty, ViewMode::Masked).as_str(), "no pii\nhere");
        assert_eq!(
            engine.render(&empty, ViewMode::Highlighted).as_str(),
            "no pii\nhere"
        );
    }

    #[test]
    fn test_render_absent_entities_keeps_newlines() {
        let engine = OverlayEngine::new(OverlayConfig::default()).unwrap();
        let response =
            DetectorResponse::from_entities(vec![Entity::new("zzz@x.io", PiiType::Email, 0.9)]);
        let result = engine.analyze_response("line one\nline two", response);
        assert!(result.has_detections());

        assert_eq!(
            engine.render(&result, ViewMode::Masked).as_str(),
            "line one\nline two"
        );
        assert_eq!(
            engine.render(&result, ViewMode::Highlighted).as_str(),
            "line one\nline two"
        );
    }

    #[test]
    fn test_offsets_strategy_from_config() {
        let mut config = OverlayConfig::default();
        config.render.strategy = MatchStrategy::Offsets;
        config.render.target = RenderTarget::Text;
        let engine = OverlayEngine::new(config).unwrap();

        let disjoint = engine.analyze_offline("a@b.io and 555-123-4567");
        assert_eq!(disjoint.masked_text, "[EMAIL_demo0] and [PHONE_demo1]");

        // The literal is reported once, so its offsets miss the repeat and
        // rendering falls back to literal matching
        let repeated = engine.analyze_offline("a@b.io and a@b.io");
        assert_eq!(repeated.masked_text, "[EMAIL_demo0] and [EMAIL_demo0]");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = OverlayConfig::default();
        config.protect.alternatives = 50;
        assert!(OverlayEngine::new(config).is_err());
    }
}
