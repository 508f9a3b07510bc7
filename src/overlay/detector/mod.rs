//! PII detection
//!
//! The real detector is an external service; this crate only ships the
//! pattern-based fallback used when that service is unreachable.

pub mod fallback;
pub mod patterns;

pub use fallback::FallbackDetector;
pub use patterns::PatternRegistry;

use crate::overlay::models::{DetectionMode, Entity};

/// Trait for in-process PII detectors
pub trait PiiDetector: Send + Sync {
    /// Detect PII entities in a document
    ///
    /// Detection over a fixed, compiled pattern set cannot fail.
    fn detect(&self, document: &str) -> Vec<Entity>;

    /// Which mode results from this detector are reported in
    fn mode(&self) -> DetectionMode;
}
