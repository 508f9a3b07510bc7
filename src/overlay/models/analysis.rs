//! Analysis result and detector response models

use super::pii_entity::{Entity, EntityType, PiiType};
use crate::overlay::risk::{classify, RiskTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the entity list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// External detector response
    Full,
    /// Offline pattern-based fallback (reduced coverage)
    Fallback,
}

/// Response shape of an external PII detector
///
/// Accepts both the minimal `{ entities }` shape and the richer
/// `{ original, masked, entities, counts }` one. The field names used by the
/// HTTP backend (`original_text`, `masked_text`, `detected_entities`) are
/// accepted as aliases. Only `entities` is consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorResponse {
    /// Echo of the analyzed text
    #[serde(default, alias = "original_text", skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    /// Detector-side masked text (ignored; the overlay recomputes it)
    #[serde(default, alias = "masked_text", skip_serializing_if = "Option::is_none")]
    pub masked: Option<String>,
    /// Detected entities
    #[serde(alias = "detected_entities")]
    pub entities: Vec<Entity>,
    /// Detector-side statistics, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<serde_json::Value>,
}

impl DetectorResponse {
    /// Build a minimal response from an entity list
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self {
            original: None,
            masked: None,
            entities,
            counts: None,
        }
    }
}

/// One analysis of one document
///
/// Created by a single detection call and replaced wholesale by the next one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The analyzed document
    pub original_text: String,
    /// Redacted rendering of the document
    pub masked_text: String,
    /// Entities in detection order
    pub detected_entities: Vec<Entity>,
    /// Number of detected entities
    pub pii_count: usize,
    /// Distinct entity types in first-seen order
    pub pii_types: Vec<EntityType>,
    /// Detection source
    pub mode: DetectionMode,
    /// Advisory messages for the presentation layer
    pub suggestions: Vec<String>,
    /// Timestamp of analysis
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Create a new analysis result
    pub fn new(
        original_text: String,
        masked_text: String,
        detected_entities: Vec<Entity>,
        mode: DetectionMode,
    ) -> Self {
        let mut pii_types: Vec<EntityType> = Vec::new();
        for entity in &detected_entities {
            if !pii_types.contains(&entity.entity_type) {
                pii_types.push(entity.entity_type.clone());
            }
        }

        Self {
            original_text,
            masked_text,
            pii_count: detected_entities.len(),
            detected_entities,
            pii_types,
            mode,
            suggestions: Vec::new(),
            analyzed_at: Utc::now(),
        }
    }

    /// Attach advisory messages
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Check if any PII was detected
    pub fn has_detections(&self) -> bool {
        !self.detected_entities.is_empty()
    }

    /// Check whether the entities came from the fallback detector
    pub fn is_fallback(&self) -> bool {
        self.mode == DetectionMode::Fallback
    }

    /// Known PII types present
    pub fn known_types(&self) -> BTreeSet<PiiType> {
        self.pii_types.iter().filter_map(EntityType::pii_type).collect()
    }

    /// Risk tier of the detected type set
    pub fn risk_tier(&self) -> RiskTier {
        classify(self.known_types())
    }
}
