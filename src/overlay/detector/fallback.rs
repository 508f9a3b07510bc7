//! Offline pattern-based fallback detector

use super::{patterns::PatternRegistry, PiiDetector};
use crate::domain::Result;
use crate::overlay::config::{FallbackConfig, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::overlay::models::{DetectionMode, Entity};
use std::collections::HashSet;
use std::sync::Arc;

/// Suggestion attached to every fallback analysis
pub const FALLBACK_NOTICE: &str = "This is demo mode. Connect to API for full functionality.";

/// Regex-based detector used when the external detector is unreachable
///
/// Coverage is intentionally narrow. Results are reported in
/// [`DetectionMode::Fallback`] so they are never mistaken for full-detector
/// output.
#[derive(Debug, Clone)]
pub struct FallbackDetector {
    pattern_registry: Arc<PatternRegistry>,
    confidence_threshold: f64,
}

impl FallbackDetector {
    /// Create a detector with the minimal built-in patterns
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(PatternRegistry::default_patterns()?))
    }

    /// Create a detector with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Build the detector described by `config`
    ///
    /// A custom pattern library wins over the `extended` flag.
    pub fn from_config(config: &FallbackConfig) -> Result<Self> {
        let registry = match (&config.pattern_library, config.extended) {
            (Some(path), _) => PatternRegistry::from_file(path)?,
            (None, true) => PatternRegistry::extended_patterns()?,
            (None, false) => PatternRegistry::default_patterns()?,
        };

        Ok(Self::with_registry(registry).with_confidence_threshold(config.confidence_threshold))
    }

    /// Set the confidence threshold
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Get the confidence threshold
    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// The compiled pattern set
    pub fn registry(&self) -> &PatternRegistry {
        &self.pattern_registry
    }
}

impl PiiDetector for FallbackDetector {
    /// Scan with every pattern in library order
    ///
    /// Each literal is reported once, by the first pattern that matched it,
    /// at its first occurrence.
    fn detect(&self, document: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for pattern in self.pattern_registry.all_patterns() {
            if pattern.confidence < self.confidence_threshold {
                continue;
            }

            for matched in pattern.regex.find_iter(document) {
                if !seen.insert(matched.as_str()) {
                    continue;
                }
                entities.push(Entity::with_position(
                    matched.as_str(),
                    pattern.pii_type,
                    pattern.confidence,
                    matched.start(),
                    matched.end(),
                ));
            }
        }

        tracing::debug!(
            patterns = self.pattern_registry.len(),
            detected = entities.len(),
            "Fallback detection complete"
        );

        entities
    }

    fn mode(&self) -> DetectionMode {
        DetectionMode::Fallback
    }
}
