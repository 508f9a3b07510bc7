//! Pattern library for the fallback detector

use crate::domain::{MaskwiseError, Result};
use crate::overlay::models::PiiType;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Minimal built-in library: EMAIL and dashed PHONE
const FALLBACK_PATTERNS: &str = include_str!("../../../../patterns/fallback_patterns.toml");

/// Extended built-in library
const EXTENDED_PATTERNS: &str = include_str!("../../../../patterns/extended_patterns.toml");

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Identifier used in error messages
    pub name: String,
    /// PII type label (wire label or short alias)
    pub category: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f64,
    /// Regex patterns for this category
    pub patterns: Vec<String>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Name of the definition this came from
    pub name: String,
    /// Compiled regex
    pub regex: Regex,
    /// PII type
    pub pii_type: PiiType,
    /// Confidence score
    pub confidence: f64,
}

/// Pattern library container
///
/// An array of tables keeps file order, which decides who claims a literal
/// first when two patterns match the same text.
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: Vec<PatternDefinition>,
}

/// Compiled, ordered pattern set
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
    patterns_by_type: HashMap<PiiType, Vec<CompiledPattern>>,
}

impl PatternRegistry {
    /// Create a pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MaskwiseError::Pattern(format!(
                "Failed to read pattern library {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content).map_err(|e| {
            MaskwiseError::Pattern(format!("Failed to parse pattern library TOML: {e}"))
        })?;

        let mut patterns = Vec::new();
        let mut patterns_by_type: HashMap<PiiType, Vec<CompiledPattern>> = HashMap::new();

        for def in library.patterns {
            let pii_type: PiiType = def.category.parse().map_err(|e| {
                MaskwiseError::Pattern(format!("Invalid category in pattern '{}': {e}", def.name))
            })?;

            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(MaskwiseError::Pattern(format!(
                    "Confidence for pattern '{}' must be between 0.0 and 1.0, got {}",
                    def.name, def.confidence
                )));
            }

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    MaskwiseError::Pattern(format!(
                        "Invalid regex in pattern '{}': {pattern_str}: {e}",
                        def.name
                    ))
                })?;

                let compiled = CompiledPattern {
                    name: def.name.clone(),
                    regex,
                    pii_type,
                    confidence: def.confidence,
                };

                patterns.push(compiled.clone());
                patterns_by_type.entry(pii_type).or_default().push(compiled);
            }
        }

        Ok(Self {
            patterns,
            patterns_by_type,
        })
    }

    /// Built-in minimal pattern set
    pub fn default_patterns() -> Result<Self> {
        Self::from_toml(FALLBACK_PATTERNS)
    }

    /// Built-in extended pattern set
    pub fn extended_patterns() -> Result<Self> {
        Self::from_toml(EXTENDED_PATTERNS)
    }

    /// All patterns in library order
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Patterns for a specific type
    pub fn patterns_for_type(&self, pii_type: PiiType) -> Option<&[CompiledPattern]> {
        self.patterns_by_type.get(&pii_type).map(|v| v.as_slice())
    }

    /// Number of compiled patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check whether the registry has no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
