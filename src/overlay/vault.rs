//! Reversible masking
//!
//! Unlike the redactor, the vault keeps the mapping from token to original
//! value, so a downstream response that echoes the tokens can be restored.
//! The mapping is sensitive; it never leaves the process unless the caller
//! serializes a [`MaskSession`] explicitly.

use crate::overlay::models::{Entity, EntityType, PiiType};
use crate::overlay::render::{apply_literal, SpanRenderer};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Short token prefix per type
pub fn token_prefix(entity_type: &EntityType) -> &'static str {
    match entity_type.pii_type() {
        Some(PiiType::Person) => "PERSON",
        Some(PiiType::Email) => "EMAIL",
        Some(PiiType::Phone) => "PHONE",
        Some(PiiType::Ssn) => "SSN",
        Some(PiiType::CreditCard) => "CARD",
        Some(PiiType::Address) => "ADDRESS",
        Some(PiiType::Date) => "DATE",
        Some(PiiType::Organization) => "ORG",
        Some(PiiType::Location) => "LOCATION",
        Some(PiiType::IpAddress) => "IP",
        Some(PiiType::Url) => "URL",
        Some(PiiType::BankAccount) => "ACCOUNT",
        None => "PII",
    }
}

/// Original value behind one token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskedEntity {
    /// Original literal
    pub text: String,
    /// Entity type
    #[serde(rename = "pii_type")]
    pub entity_type: EntityType,
    /// Detector confidence
    pub confidence: f64,
}

/// Where a known token occurs in masked text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskInfo {
    /// The token as it appears
    pub mask_token: String,
    /// Entity type
    pub pii_type: EntityType,
    /// Original literal
    pub original_text: String,
    /// Detector confidence
    pub confidence: f64,
    /// Byte range of the token
    pub position: (usize, usize),
}

/// Token mapping for one masking call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaskSession {
    /// Token to original value
    pub masks: BTreeMap<String, MaskedEntity>,
}

impl MaskSession {
    /// Restore every known token in `text`
    pub fn unmask(&self, text: &str) -> String {
        unmask_with(&self.masks, text)
    }

    /// Known tokens in `masked_text`, by position
    pub fn mask_info(&self, masked_text: &str) -> Vec<MaskInfo> {
        mask_info_with(&self.masks, masked_text)
    }

    /// Number of tokens issued
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Check whether nothing was masked
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}

fn unmask_with(masks: &BTreeMap<String, MaskedEntity>, text: &str) -> String {
    masks
        .iter()
        .fold(text.to_string(), |acc, (token, entity)| acc.replace(token.as_str(), &entity.text))
}

fn mask_info_with(masks: &BTreeMap<String, MaskedEntity>, masked_text: &str) -> Vec<MaskInfo> {
    let mut info: Vec<MaskInfo> = masks
        .iter()
        .flat_map(|(token, entity)| {
            masked_text.match_indices(token.as_str()).map(move |(start, _)| MaskInfo {
                mask_token: token.clone(),
                pii_type: entity.entity_type.clone(),
                original_text: entity.text.clone(),
                confidence: entity.confidence,
                position: (start, start + token.len()),
            })
        })
        .collect();
    info.sort_by_key(|i| i.position);
    info
}

/// Issues tokens and remembers them for the life of the vault
#[derive(Debug, Default)]
pub struct MaskVault {
    store: BTreeMap<String, MaskedEntity>,
}

struct TokenRenderer<'a> {
    issued: usize,
    store: &'a mut BTreeMap<String, MaskedEntity>,
    session: MaskSession,
}

impl TokenRenderer<'_> {
    fn token_for(&self, entity: &Entity) -> String {
        let mut hasher = Sha256::new();
        hasher.update(
            format!(
                "{}_{}_{}",
                entity.text,
                entity.entity_type.label(),
                self.issued
            )
            .as_bytes(),
        );
        let digest = format!("{:x}", hasher.finalize());
        format!("[{}_{}]", token_prefix(&entity.entity_type), &digest[..8])
    }
}

impl SpanRenderer for TokenRenderer<'_> {
    fn render(&mut self, entity: &Entity, _index: usize) -> String {
        let token = self.token_for(entity);
        let masked = MaskedEntity {
            text: entity.text.clone(),
            entity_type: entity.entity_type.clone(),
            confidence: entity.confidence,
        };
        self.issued += 1;
        self.store.insert(token.clone(), masked.clone());
        self.session.masks.insert(token.clone(), masked);
        token
    }
}

impl MaskVault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace entities with session tokens
    ///
    /// All occurrences of one literal share a token. Tokens depend on how many
    /// were issued before, so masking the same text twice yields new tokens.
    pub fn mask(&mut self, document: &str, entities: &[Entity]) -> (String, MaskSession) {
        let mut renderer = TokenRenderer {
            issued: self.store.len(),
            store: &mut self.store,
            session: MaskSession::default(),
        };
        let (masked, _) = apply_literal(document, entities, &mut renderer);
        tracing::debug!(tokens = renderer.session.len(), "Masked document");
        (masked, renderer.session)
    }

    /// Restore every token this vault has issued
    pub fn unmask(&self, text: &str) -> String {
        unmask_with(&self.store, text)
    }

    /// Known tokens in `masked_text`, by position
    pub fn mask_info(&self, masked_text: &str) -> Vec<MaskInfo> {
        mask_info_with(&self.store, masked_text)
    }

    /// Number of tokens issued so far
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check whether any token has been issued
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
