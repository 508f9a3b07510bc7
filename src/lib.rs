// Maskwise - PII Annotation & Redaction Overlay
// Copyright (c) 2025 Maskwise Contributors
// Licensed under the MIT License

//! # Maskwise - PII Annotation & Redaction Overlay
//!
//! Maskwise takes a document and the PII entities a detector found in it, and
//! derives the views a privacy tool shows its users: the document with PII
//! highlighted, the document with PII masked, a risk tier, and a "protected"
//! prompt with realistic stand-ins.
//!
//! ## Overview
//!
//! - **Highlighting** wraps each detected span in a tooltip-bearing element
//! - **Redaction** replaces each span with a `[TYPE]` placeholder
//! - **Risk classification** maps the detected type set to HIGH, MEDIUM or LOW
//! - **Fallback detection** finds emails and phone numbers offline when the
//!   external detector is unreachable
//! - **Prompt protection** swaps PII for plausible stand-ins
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`overlay`] - Matching, rendering, detection, risk and protection
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use maskwise::overlay::{OverlayConfig, OverlayEngine, ViewMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = OverlayEngine::new(OverlayConfig::default())?;
//!
//! // No detector response available: the fallback patterns step in
//! let analysis = engine.analyze("Contact me at jane@corp.com or 555-123-4567.", None);
//!
//! assert_eq!(analysis.pii_count, 2);
//! let masked = engine.render(&analysis, ViewMode::Masked);
//! assert!(!masked.as_str().contains("jane@corp.com"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Matching Rules
//!
//! Entities are matched by their literal text as whole tokens, longest
//! literal first, so `"John Johnson"` is masked as a unit before `"John"`
//! gets a chance to split it:
//!
//! ```rust
//! use maskwise::overlay::{redact, Entity, PiiType};
//!
//! let entities = vec![
//!     Entity::new("John", PiiType::Person, 0.8),
//!     Entity::new("John Johnson", PiiType::Person, 0.95),
//! ];
//! assert_eq!(redact("John Johnson", &entities), "[PERSON]");
//! ```
//!
//! ## Error Handling
//!
//! Library errors use [`domain::MaskwiseError`]. Rendering itself never
//! fails; errors come from configuration and pattern libraries:
//!
//! ```rust,no_run
//! use maskwise::domain::MaskwiseError;
//!
//! fn example() -> Result<(), MaskwiseError> {
//!     let config = maskwise::config::load_config("maskwise.toml")?;
//!     let _engine = maskwise::overlay::OverlayEngine::new(config.overlay_config())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Maskwise uses structured logging with the `tracing` crate. Detected
//! literals are never logged; use [`logging::pii_fingerprint`] to correlate:
//!
//! ```rust
//! let fingerprint = maskwise::logging::pii_fingerprint("jane@corp.com");
//! tracing::debug!(pii_fingerprint = %fingerprint, "Literal not found");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod overlay;
