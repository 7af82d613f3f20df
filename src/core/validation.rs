//! Input validation applied before anything reaches the database.

use crate::errors::{Error, Result};

/// Maximum length of names, emails and status texts.
pub const MAX_TEXT_LEN: usize = 255;

/// Maximum length of catalog brand and model names.
pub const MAX_CATALOG_TEXT_LEN: usize = 50;

/// Trims `value` and checks that it is present and at most `max_len` characters long.
pub fn require_text(field: &'static str, value: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingRequiredField { field });
    }
    limit_text(field, trimmed, max_len)?;
    Ok(trimmed.to_string())
}

/// Checks that an optional text stays within `max_len` characters.
pub fn limit_text(field: &'static str, value: &str, max_len: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(Error::InvalidField {
            field,
            message: format!("must be at most {max_len} characters (got {len})"),
        });
    }
    Ok(())
}

/// Rejects negative stock or line quantities. Zero is allowed.
pub fn non_negative_quantity(quantity: i32) -> Result<i32> {
    if quantity < 0 {
        return Err(Error::NegativeQuantity { quantity });
    }
    Ok(quantity)
}

/// Prices must be finite and non-negative.
pub fn valid_price(field: &'static str, price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidField {
            field,
            message: format!("must be a non-negative amount (got {price})"),
        });
    }
    Ok(price)
}
