//! Logging and observability
//!
//! Structured logging through `tracing`. Entity literals are PII and must
//! never reach a log line; log [`pii_fingerprint`] of a literal instead.
//!
//! # Example
//!
//! ```no_run
//! use maskwise::logging::init_logging;
//! use maskwise::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

use sha2::{Digest, Sha256};

/// Short, stable fingerprint of a PII value for correlation in logs
///
/// First 12 hex characters of the SHA-256 digest.
pub fn pii_fingerprint(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

/// Log the completion of an analysis
///
/// # Example
///
/// ```no_run
/// use maskwise::log_analysis_complete;
/// use maskwise::overlay::models::{AnalysisResult, DetectionMode};
///
/// let result = AnalysisResult::new(String::new(), String::new(), vec![], DetectionMode::Full);
/// log_analysis_complete!(&result);
/// ```
#[macro_export]
macro_rules! log_analysis_complete {
    ($result:expr) => {
        tracing::info!(
            pii_count = $result.pii_count,
            mode = ?$result.mode,
            risk = %$result.risk_tier(),
            "Analysis completed"
        );
    };
}

/// Log that the fallback detector is standing in for the external one
///
/// # Example
///
/// ```no_run
/// use maskwise::log_fallback_engaged;
///
/// log_fallback_engaged!("no detector response supplied");
/// ```
#[macro_export]
macro_rules! log_fallback_engaged {
    ($reason:expr) => {
        tracing::warn!(
            reason = $reason,
            "External detector unavailable, using fallback patterns"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use maskwise::log_error_with_context;
/// use maskwise::domain::MaskwiseError;
///
/// let error = MaskwiseError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
