//! Protect command implementation
//!
//! Replaces PII in a prompt with realistic stand-ins before the prompt is
//! sent anywhere, and reports risk, context and suggestions.

use super::{read_detector_response, read_document};
use crate::config::load_config_or_default;
use crate::overlay::config::MAX_ALTERNATIVES;
use crate::overlay::{OverlayEngine, ProtectedPrompt};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the protect command
#[derive(Args, Debug)]
pub struct ProtectArgs {
    /// Prompt file (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// External detector response JSON for the prompt
    #[arg(short, long, value_name = "FILE")]
    pub entities: Option<PathBuf>,

    /// Number of alternative protected prompts to generate
    #[arg(short, long)]
    pub alternatives: Option<usize>,

    /// Seed for stand-in selection (reproducible output)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the protected prompt as JSON
    #[arg(long)]
    pub json: bool,
}

impl ProtectArgs {
    /// Execute the protect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting protect command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Some(count) = self.alternatives {
            if count > MAX_ALTERNATIVES {
                eprintln!("--alternatives must be at most {MAX_ALTERNATIVES}");
                return Ok(2);
            }
            config.protect.alternatives = count;
        }
        if let Some(seed) = self.seed {
            config.protect.seed = Some(seed);
        }

        let engine = match OverlayEngine::new(config.overlay_config()) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build overlay engine");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let prompt = match read_document(self.input.as_deref()).await {
            Ok(prompt) => prompt,
            Err(e) => {
                eprintln!("Error: {e:#}");
                return Ok(3); // Invalid input exit code
            }
        };

        if prompt.trim().is_empty() {
            eprintln!("Prompt is empty");
            return Ok(3);
        }

        let entities = match &self.entities {
            Some(path) => match read_detector_response(path).await {
                Ok(response) => response.entities,
                Err(e) => {
                    tracing::error!(error = %e, "Invalid entities input");
                    eprintln!("Error: {e:#}");
                    return Ok(3);
                }
            },
            None => {
                tracing::warn!("No detector response supplied, using fallback patterns");
                engine.detect(&prompt)
            }
        };

        let protected = engine.protect(&prompt, &entities);

        tracing::info!(json = self.json, "Protect command completed");

        if self.json {
            println!("{}", serde_json::to_string_pretty(&protected)?);
        } else {
            print!("{}", format_console(&protected));
        }

        Ok(0)
    }
}

/// Human-readable summary of a protected prompt
///
/// Shows types and stand-ins only; the replaced literals are not echoed.
fn format_console(protected: &ProtectedPrompt) -> String {
    let mut output = String::new();

    output.push_str("🛡️  PROTECTED PROMPT\n");
    output.push_str("───────────────────────────────────────────────────────────────\n");
    output.push_str(&protected.protected_prompt);
    output.push_str("\n\n");

    output.push_str(&format!("  Risk Level:   {}\n", protected.risk_level));
    output.push_str(&format!("  Context:      {}\n", protected.context.label()));
    output.push_str(&format!("  PII Detected: {}\n", protected.pii_count));
    output.push('\n');

    if !protected.replacements_made.is_empty() {
        output.push_str("🔁 REPLACEMENTS\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        for replacement in &protected.replacements_made {
            output.push_str(&format!(
                "  {:20} → {}\n",
                replacement.entity_type.label(),
                replacement.replacement
            ));
        }
        output.push('\n');
    }

    if !protected.suggestions.is_empty() {
        output.push_str("💡 SUGGESTIONS\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        for suggestion in &protected.suggestions {
            output.push_str(&format!("  • {suggestion}\n"));
        }
        output.push('\n');
    }

    if !protected.alternatives.is_empty() {
        output.push_str("🔀 ALTERNATIVES\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        for (i, alternative) in protected.alternatives.iter().enumerate() {
            output.push_str(&format!("  {}. {alternative}\n", i + 1));
        }
        output.push('\n');
    }

    output
}
