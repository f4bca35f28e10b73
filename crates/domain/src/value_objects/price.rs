use crate::error::DomainError;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

/// A USD price per troy ounce held at decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Converts a float quote into a price, rejecting non-finite input.
    pub fn from_f64(value: f64) -> Result<Self, DomainError> {
        Decimal::from_f64(value)
            .map(Self::new)
            .ok_or_else(|| DomainError::invalid("price", format!("{value} is not representable")))
    }

    /// Fails unless the price is strictly positive.
    pub fn ensure_positive(self, field: &'static str) -> Result<Self, DomainError> {
        if self.value <= Decimal::ZERO {
            return Err(DomainError::invalid(
                field,
                format!("must be greater than zero, got {}", self.value),
            ));
        }
        Ok(self)
    }

    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }

    /// Returns this price moved by an absolute dollar delta.
    #[must_use]
    pub fn shifted_by(&self, delta: Decimal) -> Self {
        Self {
            value: self.value + delta,
        }
    }

    /// Rounds to whole cents.
    #[must_use]
    pub fn round_cents(&self) -> Self {
        Self {
            value: self.value.round_dp(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_shift_and_round() {
        let price = Price::new(dec!(2085.50));
        assert_eq!(price.shifted_by(dec!(85.50)).value, dec!(2171.00));
        assert_eq!(Price::new(dec!(2085.505)).round_cents().value, dec!(2085.50));
    }

    #[test]
    fn test_from_f64_rejects_nan() {
        assert!(Price::from_f64(f64::NAN).is_err());
        assert!(Price::from_f64(2000.0).is_ok());
    }

    #[test]
    fn test_ensure_positive() {
        assert!(Price::new(dec!(0)).ensure_positive("current_price").is_err());
        assert!(Price::new(dec!(-5)).ensure_positive("current_price").is_err());
        assert!(Price::new(dec!(1)).ensure_positive("current_price").is_ok());
    }
}
