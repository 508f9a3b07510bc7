//! Protected-prompt view
//!
//! Replaces detected PII with realistic stand-ins so the prompt still reads
//! naturally when forwarded to a third-party model. Unlike the masked view,
//! the substitution is meant to preserve intent, not to be legible as a
//! redaction.

use crate::overlay::config::ProtectConfig;
use crate::overlay::models::{Entity, EntityType, PiiType};
use crate::overlay::render::{apply_literal, SpanRenderer};
use crate::overlay::resolver::longest_first;
use crate::overlay::risk::{assess_entities, RiskTier};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suggestion returned when nothing needed protecting
pub const NO_PII_SUGGESTION: &str = "No PII detected. Your prompt appears to be privacy-safe!";

const REVIEW_SUGGESTION: &str =
    "Review the protected prompt to ensure it still conveys your intended meaning";
const INDIRECT_SUGGESTION: &str =
    "Consider if any remaining context could indirectly identify individuals";

/// Stand-in values per PII type
pub fn stand_ins(pii_type: PiiType) -> &'static [&'static str] {
    match pii_type {
        PiiType::Person => &[
            "Alex Johnson",
            "Sam Wilson",
            "Jordan Smith",
            "Taylor Brown",
            "Casey Davis",
        ],
        PiiType::Email => &[
            "user@example.com",
            "contact@company.com",
            "info@business.org",
            "hello@service.net",
        ],
        PiiType::Phone => &["555-0123", "555-0456", "555-0789", "555-0321"],
        PiiType::Organization => &[
            "TechCorp Inc",
            "Global Solutions LLC",
            "Innovation Partners",
            "Digital Services Co",
        ],
        PiiType::Location => &["Springfield", "Riverside", "Madison", "Franklin", "Georgetown"],
        PiiType::Address => &[
            "123 Main Street, Anytown, ST 12345",
            "456 Oak Avenue, Somewhere, ST 67890",
        ],
        PiiType::Ssn => &["XXX-XX-1234", "XXX-XX-5678"],
        PiiType::CreditCard | PiiType::BankAccount => {
            &["XXXX-XXXX-XXXX-1234", "XXXX-XXXX-XXXX-5678"]
        }
        PiiType::IpAddress => &["192.168.1.100", "10.0.0.50"],
        PiiType::Url => &["https://example.com", "https://sample-website.org"],
        PiiType::Date => &["2024-01-15", "2024-06-30", "2024-12-01"],
    }
}

/// `PASSPORT_NUMBER` -> `[Passport Number]`
fn title_case_placeholder(label: &str) -> String {
    let words: Vec<String> = label
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect();
    format!("[{}]", words.join(" "))
}

/// What the prompt seems to be for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptContext {
    /// Drafting or replying to mail
    EmailWriting,
    /// Working with datasets
    DataAnalysis,
    /// Customer support scenarios
    CustomerService,
    /// Payments and accounts
    Financial,
    /// Patients and treatment
    Medical,
    /// Contracts and disputes
    Legal,
    /// Anything else
    General,
}

impl PromptContext {
    /// Keyword table, checked in order; first hit wins
    const KEYWORDS: [(PromptContext, &'static [&'static str]); 6] = [
        (
            Self::EmailWriting,
            &["email", "message", "send", "reply", "subject"],
        ),
        (
            Self::DataAnalysis,
            &["data", "analysis", "chart", "graph", "statistics"],
        ),
        (
            Self::CustomerService,
            &["customer", "client", "service", "support", "complaint"],
        ),
        (
            Self::Financial,
            &["payment", "account", "transaction", "financial", "money"],
        ),
        (
            Self::Medical,
            &["patient", "medical", "health", "diagnosis", "treatment"],
        ),
        (
            Self::Legal,
            &["contract", "legal", "court", "lawsuit", "agreement"],
        ),
    ];

    /// Detect the context of a prompt by keyword
    pub fn detect(prompt: &str) -> Self {
        let lowered = prompt.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(context, _)| *context)
            .unwrap_or(Self::General)
    }

    /// Wire label
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmailWriting => "email_writing",
            Self::DataAnalysis => "data_analysis",
            Self::CustomerService => "customer_service",
            Self::Financial => "financial",
            Self::Medical => "medical",
            Self::Legal => "legal",
            Self::General => "general",
        }
    }

    /// Context-specific advice, if any
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::EmailWriting => Some(
                "Consider using placeholder emails like 'recipient@company.com' instead of real addresses",
            ),
            Self::DataAnalysis => Some("Use sample data or anonymized datasets for analysis examples"),
            Self::CustomerService => Some(
                "Replace customer names with generic identifiers like 'Customer A' or 'User123'",
            ),
            Self::Financial => {
                Some("Use placeholder account numbers and amounts for financial scenarios")
            }
            Self::Medical => Some("Replace patient information with generic medical case examples"),
            Self::Legal => {
                Some("Use hypothetical parties like 'Party A' and 'Party B' in legal scenarios")
            }
            Self::General => None,
        }
    }
}

impl fmt::Display for PromptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One substitution made in the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replacement {
    /// Literal that was replaced
    pub original: String,
    /// Stand-in that replaced it
    pub replacement: String,
    /// Entity type
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Detector confidence
    pub confidence: f64,
}

/// Result of protecting one prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectedPrompt {
    /// Prompt as submitted
    pub original_prompt: String,
    /// Prompt with stand-ins
    pub protected_prompt: String,
    /// Whether any PII was found
    pub protection_applied: bool,
    /// Detected entities, longest literal first
    pub detected_pii: Vec<Entity>,
    /// Substitutions actually made
    pub replacements_made: Vec<Replacement>,
    /// Advice for the user
    pub suggestions: Vec<String>,
    /// Detected prompt context
    pub context: PromptContext,
    /// Risk of the unprotected prompt
    pub risk_level: RiskTier,
    /// Number of detected entities
    pub pii_count: usize,
    /// Distinct entity types, first-seen order
    pub pii_types: Vec<EntityType>,
    /// Alternative protected prompts with different stand-ins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

/// Picks stand-ins and records what it replaced
struct StandInRenderer<'a> {
    rng: &'a mut StdRng,
    replacements: Vec<Replacement>,
}

impl SpanRenderer for StandInRenderer<'_> {
    fn render(&mut self, entity: &Entity, _index: usize) -> String {
        let replacement = match entity.pii_type() {
            Some(t) => stand_ins(t)
                .choose(&mut *self.rng)
                .map(|s| s.to_string())
                .unwrap_or_else(|| title_case_placeholder(t.label())),
            None => title_case_placeholder(entity.entity_type.label()),
        };

        self.replacements.push(Replacement {
            original: entity.text.clone(),
            replacement: replacement.clone(),
            entity_type: entity.entity_type.clone(),
            confidence: entity.confidence,
        });
        replacement
    }
}

/// Generates protected prompts
pub struct PromptProtector {
    rng: StdRng,
    alternatives: usize,
}

impl PromptProtector {
    /// Create a protector seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            alternatives: 0,
        }
    }

    /// Create a protector with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            alternatives: 0,
        }
    }

    /// Build the protector described by `config`
    pub fn from_config(config: &ProtectConfig) -> Self {
        let protector = match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        };
        protector.with_alternatives(config.alternatives)
    }

    /// Generate this many alternatives alongside every protected prompt
    pub fn with_alternatives(mut self, count: usize) -> Self {
        self.alternatives = count;
        self
    }

    fn substitute(&mut self, prompt: &str, entities: &[Entity]) -> (String, Vec<Replacement>) {
        let mut renderer = StandInRenderer {
            rng: &mut self.rng,
            replacements: Vec::new(),
        };
        let (protected, _) = apply_literal(prompt, entities, &mut renderer);
        (protected, renderer.replacements)
    }

    /// Protect `prompt` given the entities detected in it
    pub fn protect(&mut self, prompt: &str, entities: &[Entity]) -> ProtectedPrompt {
        let context = PromptContext::detect(prompt);

        if entities.is_empty() {
            return ProtectedPrompt {
                original_prompt: prompt.to_string(),
                protected_prompt: prompt.to_string(),
                protection_applied: false,
                detected_pii: Vec::new(),
                replacements_made: Vec::new(),
                suggestions: vec![NO_PII_SUGGESTION.to_string()],
                context,
                risk_level: RiskTier::Low,
                pii_count: 0,
                pii_types: Vec::new(),
                alternatives: Vec::new(),
            };
        }

        let (protected_prompt, replacements_made) = self.substitute(prompt, entities);
        let detected_pii: Vec<Entity> = longest_first(entities)
            .into_iter()
            .map(|(_, entity)| entity.clone())
            .collect();

        let mut pii_types: Vec<EntityType> = Vec::new();
        for entity in entities {
            if !pii_types.contains(&entity.entity_type) {
                pii_types.push(entity.entity_type.clone());
            }
        }

        let risk_level = assess_entities(entities);
        let count = self.alternatives;
        let alternatives = self.generate_alternatives(prompt, entities, count);

        tracing::info!(
            pii_count = entities.len(),
            replacements = replacements_made.len(),
            context = %context,
            risk = %risk_level,
            "Prompt protected"
        );

        ProtectedPrompt {
            original_prompt: prompt.to_string(),
            protected_prompt,
            protection_applied: true,
            suggestions: suggestions_for(entities, context),
            detected_pii,
            replacements_made,
            context,
            risk_level,
            pii_count: entities.len(),
            pii_types,
            alternatives,
        }
    }

    /// Protected variants of `prompt`, each with fresh stand-in choices
    pub fn generate_alternatives(
        &mut self,
        prompt: &str,
        entities: &[Entity],
        count: usize,
    ) -> Vec<String> {
        (0..count)
            .map(|_| self.substitute(prompt, entities).0)
            .collect()
    }
}

impl Default for PromptProtector {
    fn default() -> Self {
        Self::new()
    }
}

/// Context- and type-specific advice
pub fn suggestions_for(entities: &[Entity], context: PromptContext) -> Vec<String> {
    let mut suggestions: Vec<String> = context.suggestion().map(String::from).into_iter().collect();

    let has = |wanted: &[PiiType]| {
        entities
            .iter()
            .filter_map(Entity::pii_type)
            .any(|t| wanted.contains(&t))
    };

    let by_type: [(&[PiiType], &str); 6] = [
        (
            &[PiiType::Person],
            "Use generic names like 'John Doe' or role-based identifiers like 'the manager'",
        ),
        (
            &[PiiType::Email],
            "Replace with example emails like 'user@example.com' or describe the email type",
        ),
        (
            &[PiiType::Phone],
            "Use placeholder numbers like '555-0123' or describe as 'phone number'",
        ),
        (
            &[PiiType::Ssn, PiiType::CreditCard, PiiType::BankAccount],
            "Replace sensitive numbers with 'XXXX-XXXX-XXXX-1234' format",
        ),
        (
            &[PiiType::Address],
            "Use generic addresses like '123 Main Street, Anytown, ST 12345'",
        ),
        (
            &[PiiType::Organization],
            "Replace with generic company names like 'Company A' or 'TechCorp Inc'",
        ),
    ];

    for (types, advice) in by_type {
        if has(types) {
            suggestions.push(advice.to_string());
        }
    }

    suggestions.push(REVIEW_SUGGESTION.to_string());
    suggestions.push(INDIRECT_SUGGESTION.to_string());
    suggestions
}
