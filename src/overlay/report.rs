//! Analysis reporting
//!
//! Summarizes one or more analyses for the console or as JSON. Reports carry
//! counts, types and risk only; detected literals never appear in them.

use crate::overlay::models::{AnalysisResult, DetectionMode, PiiType};
use crate::overlay::risk::{classify, RiskTier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-document line of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Where the document came from (file path or `<stdin>`)
    pub source: String,

    /// Number of detected entities
    pub pii_count: usize,

    /// Detection source
    pub mode: DetectionMode,

    /// Risk tier of this document
    pub risk: RiskTier,
}

/// Processing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportStats {
    /// Documents with at least one detection
    pub documents_with_pii: usize,

    /// Documents without detections
    pub documents_without_pii: usize,

    /// Documents analyzed by the fallback detector
    pub fallback_documents: usize,
}

/// Aggregated analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Total documents analyzed
    pub total_documents: usize,

    /// Total PII entities detected
    pub total_pii_detected: usize,

    /// Detections by type label
    pub detections_by_type: BTreeMap<String, usize>,

    /// Risk tier across all documents
    pub overall_risk: RiskTier,

    /// One entry per document
    pub documents: Vec<DocumentSummary>,

    /// Warnings about degraded or partial results
    pub warnings: Vec<String>,

    /// Processing statistics
    pub stats: ReportStats,

    #[serde(skip)]
    known_types: BTreeSet<PiiType>,
}

impl AnalysisReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self {
            total_documents: 0,
            total_pii_detected: 0,
            detections_by_type: BTreeMap::new(),
            overall_risk: RiskTier::Unknown,
            documents: Vec::new(),
            warnings: Vec::new(),
            stats: ReportStats::default(),
            known_types: BTreeSet::new(),
        }
    }

    /// Add one analysis
    pub fn add_analysis(&mut self, source: &str, analysis: &AnalysisResult) {
        self.total_documents += 1;
        self.total_pii_detected += analysis.pii_count;

        if analysis.has_detections() {
            self.stats.documents_with_pii += 1;
        } else {
            self.stats.documents_without_pii += 1;
        }

        if analysis.is_fallback() {
            self.stats.fallback_documents += 1;
            self.add_warning(format!(
                "{source}: analyzed with fallback patterns; coverage is limited to the configured pattern library"
            ));
        }

        for entity in &analysis.detected_entities {
            *self
                .detections_by_type
                .entry(entity.entity_type.label().to_string())
                .or_insert(0) += 1;
        }

        for unknown in analysis.pii_types.iter().filter(|t| t.is_unknown()) {
            self.add_warning(format!(
                "{source}: unrecognized PII type '{unknown}' rendered generically"
            ));
        }

        self.known_types.extend(analysis.known_types());
        self.overall_risk = classify(self.known_types.iter().copied());

        self.documents.push(DocumentSummary {
            source: source.to_string(),
            pii_count: analysis.pii_count,
            mode: analysis.mode,
            risk: analysis.risk_tier(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Check whether any document contained PII
    pub fn has_detections(&self) -> bool {
        self.total_pii_detected > 0
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                      PII ANALYSIS REPORT                      \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Documents Analyzed:          {}\n",
            self.total_documents
        ));
        output.push_str(&format!(
            "  Documents with PII:          {}\n",
            self.stats.documents_with_pii
        ));
        output.push_str(&format!(
            "  Documents without PII:       {}\n",
            self.stats.documents_without_pii
        ));
        output.push_str(&format!(
            "  Total PII Entities Detected: {}\n",
            self.total_pii_detected
        ));
        output.push_str(&format!(
            "  Overall Risk:                {}\n",
            self.overall_risk
        ));
        output.push('\n');

        if !self.detections_by_type.is_empty() {
            output.push_str("🔍 PII DETECTIONS BY TYPE\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut types: Vec<_> = self.detections_by_type.iter().collect();
            types.sort_by(|a, b| b.1.cmp(a.1));

            for (label, count) in types {
                output.push_str(&format!("  {:30} {:>5}\n", label.replace('_', " "), count));
            }
            output.push('\n');
        }

        if self.documents.len() > 1 {
            output.push_str("📄 DOCUMENTS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for doc in &self.documents {
                output.push_str(&format!(
                    "  {:40} {:>4} PII  {:7}{}\n",
                    doc.source,
                    doc.pii_count,
                    doc.risk,
                    if doc.mode == DetectionMode::Fallback {
                        "  (fallback)"
                    } else {
                        ""
                    }
                ));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self::new()
    }
}
