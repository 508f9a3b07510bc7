//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "maskwise.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Maskwise configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: maskwise validate-config");
                println!("  3. Analyze a document: maskwise analyze notes.txt --view masked");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Maskwise Configuration File
# PII annotation and redaction overlay

[application]
log_level = "info"

[render]
target = "html"
strategy = "literal"

[fallback]
confidence_threshold = 0.7
extended = false

[protect]
alternatives = 3

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Maskwise Configuration File
# PII annotation and redaction overlay
#
# This file contains all configuration options with examples and explanations.
# Every setting can be overridden with MASKWISE_<SECTION>_<KEY> environment
# variables, e.g. MASKWISE_RENDER_TARGET=text.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Rendering
# ============================================================================
[render]
# Render target: "html" or "text"
# - html: highlighted spans are HTML elements, newlines become <br>
# - text: newlines are kept as-is
target = "html"

# Span matching strategy: "literal" or "offsets"
# - literal: whole-token matching of each entity's text, longest first
# - offsets: use detector byte offsets when every entity carries valid ones
#   and they cover every occurrence; otherwise literal matching is used
strategy = "literal"

# ============================================================================
# Offline Fallback Detector
# ============================================================================
[fallback]
# Patterns with a confidence below this threshold are skipped (0.0-1.0)
confidence_threshold = 0.7

# Use the extended pattern set (SSN, credit card, IP address, URL, date)
extended = false

# Optional: custom TOML pattern library (overrides the built-in sets)
# pattern_library = "${MASKWISE_PATTERN_LIBRARY}"

# ============================================================================
# Prompt Protection
# ============================================================================
[protect]
# Number of alternative protected prompts to generate (0-10)
alternatives = 3

# Optional: fixed seed for reproducible stand-in selection
# seed = 42

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
