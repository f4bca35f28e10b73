use crate::error::DomainError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A percentage expressed in percent units (4.1 means 4.1 %).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    /// `change / base * 100`; `base` must be non-zero.
    pub fn of_change(change: Decimal, base: Decimal) -> Result<Self, DomainError> {
        if base.is_zero() {
            return Err(DomainError::invalid("base", "cannot compute a change relative to zero"));
        }
        Ok(Self(change / base * Decimal::ONE_HUNDRED))
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Signed label with one decimal, e.g. `+4.1%` or `-4.6%`.
    pub fn label(&self) -> String {
        signed_percent_label(self.to_f64())
    }
}

/// Formats a percent value the way the dashboard shows it: explicit `+` for
/// non-negative values and one decimal place.
pub fn signed_percent_label(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_of_change() {
        let pct = Percentage::of_change(dec!(85.50), dec!(2085.50)).unwrap();
        assert_eq!(pct.0.round_dp(2), dec!(4.10));
        assert_eq!(pct.label(), "+4.1%");
    }

    #[test]
    fn test_of_change_zero_base() {
        assert!(Percentage::of_change(dec!(1), Decimal::ZERO).is_err());
    }

    #[test]
    fn test_signed_label() {
        assert_eq!(signed_percent_label(0.0), "+0.0%");
        assert_eq!(signed_percent_label(-4.56), "-4.6%");
    }
}
