//! CLI command implementations
//!
//! Every command returns `anyhow::Result<i32>` where the integer is the
//! process exit code:
//!
//! - `0` success
//! - `1` PII found with `--fail-on-pii`
//! - `2` configuration error
//! - `3` invalid input (blank document, malformed entity JSON)
//! - `5` fatal error

pub mod analyze;
pub mod classify;
pub mod init;
pub mod protect;
pub mod validate;

use crate::overlay::models::{DetectorResponse, Entity};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Label used for documents read from standard input
pub const STDIN_SOURCE: &str = "<stdin>";

/// Entity input accepted by `--entities`
///
/// Either a full detector response or a bare entity array.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntitiesInput {
    Response(DetectorResponse),
    Bare(Vec<Entity>),
}

/// Read a document from a file, or from stdin when no path is given
pub(crate) async fn read_document(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read standard input")?;
            Ok(buffer)
        }
    }
}

/// Read an external detector response from a JSON file
pub(crate) async fn read_detector_response(path: &Path) -> anyhow::Result<DetectorResponse> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read entities file {}", path.display()))?;

    parse_detector_response(&contents)
        .with_context(|| format!("Malformed entities file {}", path.display()))
}

fn parse_detector_response(contents: &str) -> anyhow::Result<DetectorResponse> {
    let input: EntitiesInput = serde_json::from_str(contents)?;

    let response = match input {
        EntitiesInput::Response(response) => response,
        EntitiesInput::Bare(entities) => DetectorResponse::from_entities(entities),
    };

    if let Some(entity) = response
        .entities
        .iter()
        .find(|e| !(0.0..=1.0).contains(&e.confidence))
    {
        anyhow::bail!(
            "Entity of type {} has confidence {} outside 0.0-1.0",
            entity.entity_type,
            entity.confidence
        );
    }

    Ok(response)
}

/// Display name for a document source
pub(crate) fn source_name(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| STDIN_SOURCE.to_string())
}
