//! Identifier coercion for raw path segments

use super::errors::{BookError, BookResult};

/// Coerce a raw identifier to a numeric `Id`.
///
/// Blank input is `MissingId`. Input that is not an integral number
/// (`"abc"`, `"1.5"`, `"inf"`) yields `None`, which matches no record.
/// `" 7 "`, `"+7"`, `"7.0"` and `"7e0"` all coerce to 7.
pub fn coerce_id(raw: &str) -> BookResult<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BookError::MissingId);
    }

    if let Ok(id) = trimmed.parse::<i64>() {
        return Ok(Some(id));
    }

    match trimmed.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value >= i64::MIN as f64
                && value < i64::MAX as f64 =>
        {
            Ok(Some(value as i64))
        }
        _ => Ok(None),
    }
}
