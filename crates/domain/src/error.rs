//! Domain validation errors.

use thiserror::Error;

/// Errors raised when domain values fail validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A parameter is outside the domain the model is defined on.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable explanation.
        reason: String,
    },
}

impl DomainError {
    /// Shorthand for building an [`DomainError::InvalidParameter`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the name of the field that failed validation.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidParameter { field, .. } => *field,
        }
    }
}

/// Checks that a price is finite and strictly positive.
pub fn ensure_positive_price(field: &'static str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::invalid(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(DomainError::invalid(
            field,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_field() {
        let err = DomainError::invalid("current_price", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid parameter `current_price`: must be greater than zero"
        );
        assert_eq!(err.field(), "current_price");
    }

    #[test]
    fn test_ensure_positive_price() {
        assert!(ensure_positive_price("p", 2000.0).is_ok());
        assert!(ensure_positive_price("p", 0.0).is_err());
        assert!(ensure_positive_price("p", -1.0).is_err());
        assert!(ensure_positive_price("p", f64::NAN).is_err());
        assert!(ensure_positive_price("p", f64::INFINITY).is_err());
    }
}
