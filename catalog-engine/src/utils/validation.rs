//! Input validation helpers
//!
//! Record-level checks applied when records enter the engine or the store.
//! A failing record is skipped and reported, never fatal to the batch.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Record IDs ("product:xxx", uuid, slug)
pub const MAX_ID_LEN: usize = 128;

/// Entity names: brand, category, series, product, service, variant
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and notes
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        ));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a record or reference ID.
pub fn validate_id(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_ID_LEN)
}

/// Validate that a price is not negative.
pub fn validate_price(value: Decimal, field: &str) -> Result<(), AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("{field} must not be negative (got {value})"),
        ));
    }
    Ok(())
}

/// Validate an optional price.
pub fn validate_optional_price(value: Option<Decimal>, field: &str) -> Result<(), AppError> {
    match value {
        Some(v) => validate_price(v, field),
        None => Ok(()),
    }
}
