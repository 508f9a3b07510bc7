//! PII entity data models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of PII types understood by the overlay engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiType {
    /// Person names
    Person,
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// Social Security Numbers
    Ssn,
    /// Payment card numbers
    CreditCard,
    /// Street addresses
    Address,
    /// Calendar dates
    Date,
    /// Companies and institutions
    Organization,
    /// Cities, regions, countries
    Location,
    /// IPv4 addresses
    IpAddress,
    /// Web URLs
    Url,
    /// Bank account numbers
    BankAccount,
}

impl PiiType {
    /// Every type, in legend order
    pub const ALL: [PiiType; 12] = [
        Self::Person,
        Self::Email,
        Self::Phone,
        Self::Ssn,
        Self::CreditCard,
        Self::Address,
        Self::Date,
        Self::Organization,
        Self::Location,
        Self::IpAddress,
        Self::Url,
        Self::BankAccount,
    ];

    /// Wire label, underscores preserved (e.g. `CREDIT_CARD`)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Ssn => "SSN",
            Self::CreditCard => "CREDIT_CARD",
            Self::Address => "ADDRESS",
            Self::Date => "DATE",
            Self::Organization => "ORGANIZATION",
            Self::Location => "LOCATION",
            Self::IpAddress => "IP_ADDRESS",
            Self::Url => "URL",
            Self::BankAccount => "BANK_ACCOUNT",
        }
    }

    /// Human-readable legend name (`CREDIT CARD`)
    pub fn display_name(&self) -> String {
        self.label().replace('_', " ")
    }

    /// Badge color classes used by the presentation layer
    pub fn color_class(&self) -> &'static str {
        match self {
            Self::Person => "bg-blue-100 text-blue-800",
            Self::Email => "bg-green-100 text-green-800",
            Self::Phone => "bg-purple-100 text-purple-800",
            Self::Ssn => "bg-red-100 text-red-800",
            Self::CreditCard => "bg-orange-100 text-orange-800",
            Self::Address => "bg-indigo-100 text-indigo-800",
            Self::Date => "bg-pink-100 text-pink-800",
            Self::Organization => "bg-teal-100 text-teal-800",
            Self::Location => "bg-cyan-100 text-cyan-800",
            Self::IpAddress => "bg-gray-100 text-gray-800",
            Self::Url => "bg-lime-100 text-lime-800",
            Self::BankAccount => "bg-amber-100 text-amber-800",
        }
    }
}

impl fmt::Display for PiiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PiiType {
    type Err = String;

    /// Parses wire labels plus the short aliases used by pattern libraries
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PERSON" | "NAME" => Ok(Self::Person),
            "EMAIL" => Ok(Self::Email),
            "PHONE" => Ok(Self::Phone),
            "SSN" => Ok(Self::Ssn),
            "CREDIT_CARD" | "CARD" => Ok(Self::CreditCard),
            "ADDRESS" => Ok(Self::Address),
            "DATE" => Ok(Self::Date),
            "ORGANIZATION" | "ORG" => Ok(Self::Organization),
            "LOCATION" => Ok(Self::Location),
            "IP_ADDRESS" | "IP" => Ok(Self::IpAddress),
            "URL" => Ok(Self::Url),
            "BANK_ACCOUNT" | "ACCOUNT" => Ok(Self::BankAccount),
            other => Err(format!("Unknown PII type: {other}")),
        }
    }
}

/// Display category for one entity type
///
/// Total over known and unknown types; unknown labels get the generic
/// category and the default gray color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCategory {
    /// CSS-like category tag (`pii-EMAIL`, `pii-generic`)
    pub css_class: String,
    /// Badge color classes
    pub color_class: &'static str,
    /// Label shown in tooltips and legends
    pub label: String,
}

/// Default badge color for unstyled categories
pub const DEFAULT_COLOR_CLASS: &str = "bg-gray-100 text-gray-800";

/// Entity type as received from a detector
///
/// External detectors may emit labels outside the closed [`PiiType`] set.
/// Those are kept verbatim as `Unknown` so that nothing downstream fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// One of the closed set of PII types
    Known(PiiType),
    /// A label this build does not recognize
    Unknown(String),
}

impl EntityType {
    /// The known PII type, if any
    pub fn pii_type(&self) -> Option<PiiType> {
        match self {
            Self::Known(t) => Some(*t),
            Self::Unknown(_) => None,
        }
    }

    /// The label as received
    pub fn label(&self) -> &str {
        match self {
            Self::Known(t) => t.label(),
            Self::Unknown(raw) => raw,
        }
    }

    /// Check whether this label is outside the closed set
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Display category lookup
    pub fn display_category(&self) -> DisplayCategory {
        match self {
            Self::Known(t) => DisplayCategory {
                css_class: format!("pii-{}", t.label()),
                color_class: t.color_class(),
                label: t.label().to_string(),
            },
            Self::Unknown(raw) => DisplayCategory {
                css_class: "pii-generic".to_string(),
                color_class: DEFAULT_COLOR_CLASS,
                label: raw.clone(),
            },
        }
    }
}

impl From<PiiType> for EntityType {
    fn from(t: PiiType) -> Self {
        Self::Known(t)
    }
}

impl From<String> for EntityType {
    fn from(raw: String) -> Self {
        match raw.parse::<PiiType>() {
            // Only exact wire labels map to known types; aliases stay raw
            Ok(t) if t.label() == raw => Self::Known(t),
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for EntityType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<EntityType> for String {
    fn from(t: EntityType) -> Self {
        match t {
            EntityType::Known(t) => t.label().to_string(),
            EntityType::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detected PII entity
///
/// Matching is by literal `text`, so an entity only means something relative
/// to a document that contains it. Offsets are optional; the fallback
/// detector fills them, external detectors usually do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Exact literal as it appears in the document
    pub text: String,
    /// PII type label
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f64,
    /// Byte offset of the first character, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// Byte offset one past the last character, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl Entity {
    /// Create a new entity without position information
    pub fn new(text: impl Into<String>, entity_type: impl Into<EntityType>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
            confidence: confidence.clamp(0.0, 1.0),
            start: None,
            end: None,
        }
    }

    /// Create a new entity with byte offsets
    pub fn with_position(
        text: impl Into<String>,
        entity_type: impl Into<EntityType>,
        confidence: f64,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::new(text, entity_type, confidence)
        }
    }

    /// The known PII type, if any
    pub fn pii_type(&self) -> Option<PiiType> {
        self.entity_type.pii_type()
    }

    /// Offsets as a half-open range, when both are present
    pub fn span(&self) -> Option<(usize, usize)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Literal length in characters, used for longest-first ordering
    pub fn literal_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Confidence as a percentage with one decimal (`87.3%`)
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}
