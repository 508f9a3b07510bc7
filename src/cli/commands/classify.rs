//! Classify command implementation
//!
//! Prints the risk tier for a set of PII types, and optionally the display
//! legend of every known type.

use crate::overlay::models::{EntityType, PiiType};
use crate::overlay::risk::classify;
use clap::Args;

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// PII types (comma-separated, e.g. "SSN,PERSON")
    #[arg(default_value = "")]
    pub types: String,

    /// Also print the legend of all known types
    #[arg(long)]
    pub legend: bool,
}

impl ClassifyArgs {
    /// Execute the classify command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let types = parse_types(&self.types);

        for unknown in types.iter().filter(|t| t.is_unknown()) {
            tracing::warn!(pii_type = %unknown, "Unrecognized PII type ignored for risk");
        }

        let tier = classify(types.iter().filter_map(EntityType::pii_type));
        tracing::info!(types = types.len(), risk = %tier, "Classified PII types");

        println!("Risk Level: {tier}");
        println!("Badge:      {}", tier.badge_class());

        if self.legend {
            println!();
            print!("{}", format_legend());
        }

        Ok(0)
    }
}

fn parse_types(input: &str) -> Vec<EntityType> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| EntityType::from(s.to_uppercase()))
        .collect()
}

/// One line per known type: display name and color class
fn format_legend() -> String {
    let mut output = String::from("PII Types:\n");
    for pii_type in PiiType::ALL {
        output.push_str(&format!(
            "  {:16} {}\n",
            pii_type.display_name(),
            pii_type.color_class()
        ));
    }
    output
}
