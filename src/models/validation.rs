//! Field validation applied at the repository boundary

use thiserror::Error;

/// Longest accepted name, username, unit or e-mail
pub const MAX_TEXT_LEN: usize = 100;

/// Validation error for domain fields
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Field is empty (or only whitespace)
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric field below zero
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// Numeric field is NaN or infinite
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// String doesn't match the required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

/// Trim a required text field and check its length
pub fn required_text<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(value)
}

pub fn email(value: &str) -> Result<&str, ValidationError> {
    let value = required_text("email", value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(value),
        _ => Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "must look like name@domain",
        }),
    }
}

/// Quantities are finite and never negative
pub fn quantity(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field: "quantity" });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field: "quantity" });
    }
    Ok(value)
}
