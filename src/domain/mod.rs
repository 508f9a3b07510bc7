//! Domain error and result types for Maskwise.
//!
//! All fallible library operations return [`Result<T, MaskwiseError>`]:
//!
//! ```rust
//! use maskwise::domain::{MaskwiseError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = maskwise::config::load_config_or_default("maskwise.toml")?;
//!     assert!(config.fallback.confidence_threshold <= 1.0);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::MaskwiseError;
pub use result::Result;
