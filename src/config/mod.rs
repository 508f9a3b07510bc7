//! Configuration management for Maskwise.
//!
//! TOML-based configuration with environment variable substitution,
//! `MASKWISE_*` overrides, defaults for every setting and validation on load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use maskwise::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("maskwise.toml")?;
//!
//! println!("Render target: {}", config.render.target);
//! println!("Extended patterns: {}", config.fallback.extended);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`RenderConfig`] - render target and span matching strategy
//! - [`FallbackConfig`] - offline detector pattern library and threshold
//! - [`ProtectConfig`] - prompt protection alternatives and seed
//! - [`LoggingConfig`] - local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [render]
//! target = "html"
//! strategy = "literal"
//!
//! [fallback]
//! confidence_threshold = 0.7
//! extended = false
//! pattern_library = "${MASKWISE_PATTERNS}"
//!
//! [protect]
//! alternatives = 3
//! ```

pub mod loader;
pub mod schema;

pub use crate::overlay::config::{FallbackConfig, ProtectConfig, RenderConfig};
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, LoggingConfig, MaskwiseConfig};
