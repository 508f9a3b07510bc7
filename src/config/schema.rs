//! Configuration schema types

use crate::overlay::config::{FallbackConfig, OverlayConfig, ProtectConfig, RenderConfig};
use serde::{Deserialize, Serialize};

/// Main Maskwise configuration
///
/// Root structure of the TOML file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskwiseConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Offline fallback detector settings
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Prompt protection settings
    #[serde(default)]
    pub protect: ProtectConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MaskwiseConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.fallback.validate()?;
        self.protect.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// The overlay engine's slice of the configuration
    pub fn overlay_config(&self) -> OverlayConfig {
        OverlayConfig {
            render: self.render.clone(),
            fallback: self.fallback.clone(),
            protect: self.protect.clone(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must not be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::config::{MatchStrategy, RenderTarget};

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
        };
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "./logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let config = LoggingConfig {
            local_rotation: "size".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        let config: MaskwiseConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.render.target, RenderTarget::Html);
        assert_eq!(config.render.strategy, MatchStrategy::Literal);
        assert_eq!(config.fallback.confidence_threshold, 0.7);
        assert_eq!(config.protect.alternatives, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlay_config_slice() {
        let config: MaskwiseConfig = toml::from_str(
            r#"
[render]
target = "text"
strategy = "offsets"

[fallback]
extended = true

[protect]
seed = 42
"#,
        )
        .unwrap();

        let overlay = config.overlay_config();
        assert_eq!(overlay.render.target, RenderTarget::Text);
        assert_eq!(overlay.render.strategy, MatchStrategy::Offsets);
        assert!(overlay.fallback.extended);
        assert_eq!(overlay.protect.seed, Some(42));
    }
}
