use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::models::RawMovement;

/// Wire shape of the inventory endpoint.
#[derive(Debug, Serialize)]
struct MovementsJson<'a> {
    movements: &'a [RawMovement],
}

/// Parse a movements file into raw records.
pub fn parse_movements_json(json_path: &Path) -> Result<Vec<RawMovement>> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;
    parse_movements_json_str(&json_content)
        .with_context(|| format!("Failed to parse movements from {}", json_path.display()))
}

/// Parse movements from a string.
///
/// Accepts the endpoint shape `{"movements": [...]}` or a bare array of
/// records.
pub fn parse_movements_json_str(json_str: &str) -> Result<Vec<RawMovement>> {
    let json_value: serde_json::Value = serde_json::from_str(json_str).with_context(|| {
        let preview = if json_str.len() > 500 {
            let mut end = 500;
            while !json_str.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &json_str[..end])
        } else {
            json_str.to_string()
        };
        format!("Invalid JSON syntax. First 500 chars: {}", preview)
    })?;

    let records = match &json_value {
        serde_json::Value::Array(_) => &json_value,
        serde_json::Value::Object(map) => map.get("movements").ok_or_else(|| {
            anyhow::anyhow!(
                "JSON must contain a 'movements' key. Found keys: {:?}",
                map.keys().collect::<Vec<_>>()
            )
        })?,
        other => anyhow::bail!(
            "Expected an object or an array of movements, found {}",
            json_type_name(other)
        ),
    };

    let movements: Vec<RawMovement> = serde_path_to_error::deserialize(records).map_err(|e| {
        anyhow::anyhow!("Invalid movement at 'movements{}': {}", e.path(), e.inner())
    })?;

    log::debug!("Parsed {} movements", movements.len());
    Ok(movements)
}

/// Serialize movements in the endpoint shape.
pub fn movements_to_json(movements: &[RawMovement]) -> Result<String> {
    serde_json::to_string_pretty(&MovementsJson { movements })
        .context("Failed to serialize movements")
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "json_parser_tests.rs"]
mod json_parser_tests;
