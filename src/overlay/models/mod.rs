//! Overlay data models

pub mod analysis;
pub mod pii_entity;
pub mod rendered;

pub use analysis::{AnalysisResult, DetectionMode, DetectorResponse};
pub use pii_entity::{DisplayCategory, Entity, EntityType, PiiType, DEFAULT_COLOR_CLASS};
pub use rendered::{HighlightedText, MaskedText, RenderedDocument, ViewMode};
