//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Maskwise configuration file.

use crate::config::load_config;
use crate::overlay::FallbackDetector;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration (validation runs as part of loading)
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Compile the pattern library the fallback detector would use
        let detector = match FallbackDetector::from_config(&config.fallback) {
            Ok(d) => d,
            Err(e) => {
                println!("❌ Pattern library failed to load");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Render Target: {}", config.render.target);
        println!("  Match Strategy: {}", config.render.strategy);
        println!(
            "  Confidence Threshold: {}",
            config.fallback.confidence_threshold
        );
        match &config.fallback.pattern_library {
            Some(path) => println!("  Pattern Library: {}", path.display()),
            None if config.fallback.extended => println!("  Pattern Library: built-in (extended)"),
            None => println!("  Pattern Library: built-in (minimal)"),
        }
        println!("  Compiled Patterns: {}", detector.registry().len());
        println!("  Prompt Alternatives: {}", config.protect.alternatives);
        if config.logging.local_enabled {
            println!(
                "  Local Logs: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(0)
    }
}
