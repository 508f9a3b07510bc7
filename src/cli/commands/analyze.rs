//! Analyze command implementation
//!
//! Runs one or more documents through the overlay engine and prints the
//! highlighted view, the masked view, the analysis as JSON or a summary
//! report.

use super::{read_detector_response, read_document, source_name};
use crate::config::load_config_or_default;
use crate::overlay::{AnalysisReport, AnalysisResult, OverlayEngine, ViewMode};
use clap::Args;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// What `analyze` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputView {
    /// Original text with PII spans highlighted
    Highlighted,
    /// Text with PII replaced by placeholders
    Masked,
    /// The full analysis result as JSON
    Json,
    /// Summary report without any detected literals
    Report,
}

impl FromStr for OutputView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highlighted" | "highlight" => Ok(Self::Highlighted),
            "masked" | "mask" => Ok(Self::Masked),
            "json" => Ok(Self::Json),
            "report" => Ok(Self::Report),
            other => Err(format!(
                "Invalid view '{other}'. Must be one of: highlighted, masked, json, report"
            )),
        }
    }
}

impl fmt::Display for OutputView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Highlighted => "highlighted",
            Self::Masked => "masked",
            Self::Json => "json",
            Self::Report => "report",
        };
        f.write_str(name)
    }
}

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Documents to analyze (reads stdin when omitted)
    pub inputs: Vec<PathBuf>,

    /// External detector response JSON for the document
    #[arg(short, long, value_name = "FILE")]
    pub entities: Option<PathBuf>,

    /// Output view (highlighted, masked, json, report)
    #[arg(long, default_value = "highlighted")]
    pub view: OutputView,

    /// Override render target (html or text)
    #[arg(long)]
    pub target: Option<String>,

    /// Override span matching strategy (literal or offsets)
    #[arg(long)]
    pub strategy: Option<String>,

    /// Exit with code 1 when any PII is detected
    #[arg(long)]
    pub fail_on_pii: bool,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            documents = self.inputs.len().max(1),
            view = %self.view,
            "Starting analyze command"
        );

        if self.entities.is_some() && self.inputs.len() > 1 {
            eprintln!("--entities applies to a single document; got {}", self.inputs.len());
            return Ok(3); // Invalid input exit code
        }

        // Load configuration
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(target) = &self.target {
            match target.parse() {
                Ok(t) => config.render.target = t,
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(2);
                }
            }
        }
        if let Some(strategy) = &self.strategy {
            match strategy.parse() {
                Ok(s) => config.render.strategy = s,
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(2);
                }
            }
        }

        let engine = match OverlayEngine::new(config.overlay_config()) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build overlay engine");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let response = match &self.entities {
            Some(path) => match read_detector_response(path).await {
                Ok(response) => Some(response),
                Err(e) => {
                    tracing::error!(error = %e, "Invalid entities input");
                    eprintln!("Error: {e:#}");
                    return Ok(3);
                }
            },
            None => None,
        };

        let sources: Vec<Option<&std::path::Path>> = if self.inputs.is_empty() {
            vec![None]
        } else {
            self.inputs.iter().map(|p| Some(p.as_path())).collect()
        };

        let mut report = AnalysisReport::new();
        let mut analyses: Vec<AnalysisResult> = Vec::with_capacity(sources.len());

        for source in sources {
            let name = source_name(source);
            let document = match read_document(source).await {
                Ok(document) => document,
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    return Ok(3);
                }
            };

            if document.trim().is_empty() {
                eprintln!("{name}: document is empty");
                return Ok(3);
            }

            let analysis = engine.analyze(&document, response.clone());
            report.add_analysis(&name, &analysis);

            match self.view {
                OutputView::Highlighted | OutputView::Masked => {
                    let view = if self.view == OutputView::Masked {
                        ViewMode::Masked
                    } else {
                        ViewMode::Highlighted
                    };
                    if self.inputs.len() > 1 {
                        println!("==> {name} <==");
                    }
                    println!("{}", engine.render(&analysis, view).as_str());
                    for suggestion in &analysis.suggestions {
                        eprintln!("ℹ️  {suggestion}");
                    }
                }
                OutputView::Json | OutputView::Report => {}
            }

            analyses.push(analysis);
        }

        match self.view {
            OutputView::Json => {
                let json = if analyses.len() == 1 {
                    serde_json::to_string_pretty(&analyses[0])?
                } else {
                    serde_json::to_string_pretty(&analyses)?
                };
                println!("{json}");
            }
            OutputView::Report => print!("{}", report.format_console()),
            OutputView::Highlighted | OutputView::Masked => {}
        }

        tracing::info!(
            documents = report.total_documents,
            pii_detected = report.total_pii_detected,
            risk = %report.overall_risk,
            "Analyze command completed"
        );

        if self.fail_on_pii && report.has_detections() {
            return Ok(1); // PII found exit code
        }

        Ok(0)
    }
}
