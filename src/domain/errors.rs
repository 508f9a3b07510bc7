//! Domain error types
//!
//! The overlay core is pure and almost never fails: rendering, redaction and
//! classification are total. Errors only arise at the edges, when loading
//! configuration or pattern libraries, or when parsing detector responses.

use thiserror::Error;

/// Main Maskwise error type
#[derive(Debug, Error)]
pub enum MaskwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Pattern library errors (invalid regex, unknown category)
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for MaskwiseError {
    fn from(err: std::io::Error) -> Self {
        MaskwiseError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MaskwiseError {
    fn from(err: serde_json::Error) -> Self {
        MaskwiseError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for MaskwiseError {
    fn from(err: toml::de::Error) -> Self {
        MaskwiseError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<regex::Error> for MaskwiseError {
    fn from(err: regex::Error) -> Self {
        MaskwiseError::Pattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MaskwiseError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");

        let err = MaskwiseError::Pattern("bad regex".to_string());
        assert_eq!(err.to_string(), "Pattern error: bad regex");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: MaskwiseError = io_err.into();
        assert!(matches!(err, MaskwiseError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: MaskwiseError = json_err.into();
        assert!(matches!(err, MaskwiseError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: MaskwiseError = toml_err.into();
        assert!(matches!(err, MaskwiseError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: MaskwiseError = regex_err.into();
        assert!(matches!(err, MaskwiseError::Pattern(_)));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = MaskwiseError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
