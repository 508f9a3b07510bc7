//! Overlay engine configuration

use crate::domain::{MaskwiseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default confidence threshold for fallback patterns
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Upper bound on generated prompt alternatives
pub const MAX_ALTERNATIVES: usize = 10;

/// Where rendered output will be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTarget {
    /// HTML fragment; newlines become `<br>`
    #[default]
    Html,
    /// Plain text; newlines are kept
    #[serde(alias = "plain")]
    Text,
}

impl RenderTarget {
    /// Line-break marker for this target
    pub fn line_break(&self) -> &'static str {
        match self {
            Self::Html => "<br>",
            Self::Text => "\n",
        }
    }
}

impl FromStr for RenderTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "text" | "plain" => Ok(Self::Text),
            other => Err(format!("Invalid render target '{other}'. Must be 'html' or 'text'")),
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// How entity spans are located in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Whole-token literal substitution, longest literal first
    #[default]
    Literal,
    /// Non-overlapping offset intervals; needs offsets on every entity
    Offsets,
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(Self::Literal),
            "offsets" => Ok(Self::Offsets),
            other => Err(format!(
                "Invalid match strategy '{other}'. Must be 'literal' or 'offsets'"
            )),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => f.write_str("literal"),
            Self::Offsets => f.write_str("offsets"),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output target
    #[serde(default)]
    pub target: RenderTarget,

    /// Span location strategy
    #[serde(default)]
    pub strategy: MatchStrategy,
}

/// Offline fallback detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Patterns below this confidence are skipped
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Use the extended pattern library instead of the minimal one
    #[serde(default)]
    pub extended: bool,

    /// Custom pattern library TOML file (overrides `extended`)
    pub pattern_library: Option<PathBuf>,
}

fn default_confidence_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            extended: false,
            pattern_library: None,
        }
    }
}

impl FallbackConfig {
    /// Validate fallback settings
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "fallback.confidence_threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            ));
        }

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(format!("Pattern library file not found: {}", path.display()));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                ));
            }
        }

        Ok(())
    }
}

/// Prompt protection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectConfig {
    /// Number of alternative protected prompts to generate
    #[serde(default = "default_alternatives")]
    pub alternatives: usize,

    /// Fixed RNG seed for reproducible stand-ins
    pub seed: Option<u64>,
}

fn default_alternatives() -> usize {
    3
}

impl Default for ProtectConfig {
    fn default() -> Self {
        Self {
            alternatives: default_alternatives(),
            seed: None,
        }
    }
}

impl ProtectConfig {
    /// Validate prompt protection settings
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.alternatives > MAX_ALTERNATIVES {
            return Err(format!(
                "protect.alternatives must be at most {MAX_ALTERNATIVES}, got {}",
                self.alternatives
            ));
        }
        Ok(())
    }
}

/// Everything the overlay engine needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Fallback detector settings
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// Prompt protection settings
    #[serde(default)]
    pub protect: ProtectConfig,
}

impl OverlayConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.fallback
            .validate()
            .and_then(|_| self.protect.validate())
            .map_err(MaskwiseError::Configuration)
    }
}
