//! PII annotation and redaction overlay
//!
//! Takes a document plus the entities an external detector found in it and
//! derives the highlighted, masked and protected-prompt views. When the
//! external detector is unreachable, a small pattern-based fallback detector
//! supplies the entities instead.
//!
//! # Architecture
//!
//! - [`matcher`]: whole-token literal matching
//! - [`resolver`]: longest-first ordering and offset intervals
//! - [`render`]: annotator and redactor over a shared substitution pass
//! - [`detector`]: fallback pattern detector
//! - [`risk`]: risk tier classification
//! - [`protector`]: stand-in substitution for prompts
//! - [`vault`]: reversible token masking
//! - [`engine`]: wiring of the above from configuration
//!
//! The core functions are pure: no I/O, no shared mutable state.
//!
//! # Example
//!
//! ```
//! use maskwise::overlay::{annotate, classify, redact, Entity, PiiType, RiskTier};
//!
//! let entities = vec![Entity::new("jane@corp.com", PiiType::Email, 0.9)];
//! let document = "Contact jane@corp.com";
//!
//! assert_eq!(redact(document, &entities), "Contact [EMAIL]");
//! assert!(annotate(document, &entities).as_str().contains("EMAIL (90.0% confidence)"));
//! assert_eq!(classify([PiiType::Email]), RiskTier::Medium);
//! ```

pub mod config;
pub mod detector;
pub mod engine;
pub mod matcher;
pub mod models;
pub mod protector;
pub mod render;
pub mod report;
pub mod resolver;
pub mod risk;
pub mod vault;

pub use config::{MatchStrategy, OverlayConfig, RenderTarget};
pub use detector::{FallbackDetector, PiiDetector};
pub use engine::OverlayEngine;
pub use models::{
    AnalysisResult, DetectionMode, DetectorResponse, Entity, EntityType, HighlightedText,
    MaskedText, PiiType, RenderedDocument, ViewMode,
};
pub use protector::{PromptProtector, ProtectedPrompt};
pub use render::{annotate, redact};
pub use report::AnalysisReport;
pub use risk::{classify, RiskTier};
pub use vault::{MaskSession, MaskVault};

/// Detect entities with the minimal built-in fallback patterns
///
/// # Errors
///
/// Fails only if the built-in pattern library does not compile.
pub fn detect(document: &str) -> crate::domain::Result<Vec<Entity>> {
    Ok(FallbackDetector::new()?.detect(document))
}
