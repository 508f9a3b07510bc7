//! Risk classification over detected PII types

use crate::overlay::models::{Entity, PiiType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse privacy risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    /// Financial or government identifiers present
    High,
    /// Direct contact details present
    Medium,
    /// Names, organizations or places only
    Low,
    /// Nothing classifiable; treated as no risk
    Unknown,
}

impl RiskTier {
    /// Wire label
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Badge color classes used by the presentation layer
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::High => "text-red-600 bg-red-100",
            Self::Medium => "text-yellow-600 bg-yellow-100",
            Self::Low => "text-green-600 bg-green-100",
            Self::Unknown => "text-gray-600 bg-gray-100",
        }
    }

    /// Check whether this tier carries any risk at all
    pub fn is_risky(&self) -> bool {
        matches!(self, Self::High | Self::Medium)
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

fn is_high_risk(t: PiiType) -> bool {
    matches!(t, PiiType::Ssn | PiiType::CreditCard | PiiType::BankAccount)
}

fn is_medium_risk(t: PiiType) -> bool {
    matches!(t, PiiType::Email | PiiType::Phone | PiiType::Address)
}

/// Map a set of PII types to a risk tier
///
/// HIGH indicators dominate MEDIUM, which dominate LOW. Any other known type
/// (dates, URLs, IP addresses) is LOW. An empty set is UNKNOWN.
pub fn classify<I>(types: I) -> RiskTier
where
    I: IntoIterator<Item = PiiType>,
{
    let mut tier = RiskTier::Unknown;
    for t in types {
        if is_high_risk(t) {
            return RiskTier::High;
        }
        if is_medium_risk(t) {
            tier = RiskTier::Medium;
        } else if tier == RiskTier::Unknown {
            tier = RiskTier::Low;
        }
    }
    tier
}

/// Risk of a concrete entity list, as used for prompt protection
///
/// Same precedence as [`classify`], except that more than three entities
/// escalate a LOW result to MEDIUM, and an empty list is LOW (nothing to
/// protect). Unknown types count toward the escalation but not the tier.
pub fn assess_entities(entities: &[Entity]) -> RiskTier {
    if entities.is_empty() {
        return RiskTier::Low;
    }

    for entity in entities.iter().filter(|e| e.entity_type.is_unknown()) {
        tracing::warn!(
            entity_type = %entity.entity_type,
            "Unknown PII type contributes no risk"
        );
    }

    match classify(entities.iter().filter_map(Entity::pii_type)) {
        RiskTier::High => RiskTier::High,
        RiskTier::Medium => RiskTier::Medium,
        _ if entities.len() > 3 => RiskTier::Medium,
        _ => RiskTier::Low,
    }
}
