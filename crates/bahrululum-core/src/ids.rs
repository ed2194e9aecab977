//! Parsing of identifiers that arrive as path or query strings.

use anyhow::anyhow;
use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path id, failing with `Invalid <entity> ID`.
///
/// ```ignore
/// let id = parse_id(&raw, "course")?; // 400 "Invalid course ID"
/// ```
pub fn parse_id(raw: &str, entity: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::bad_request(anyhow!("Invalid {} ID", entity)))
}

/// Parses a required `?<name>=` filter.
///
/// Missing or blank → `<name> parameter is required`; malformed →
/// `Invalid <name> parameter`.
pub fn parse_required_param(raw: Option<&str>, name: &str) -> Result<Uuid, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request(anyhow!("{} parameter is required", name)))?;

    Uuid::parse_str(raw).map_err(|_| AppError::bad_request(anyhow!("Invalid {} parameter", name)))
}
