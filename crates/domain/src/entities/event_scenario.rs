//! Deterministic market events with fixed price deltas.

use crate::enums::{Impact, ProbabilityTier};
use crate::error::DomainError;
use crate::value_objects::{Percentage, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A market event with an estimated, fixed dollar impact on gold.
///
/// The probability is a static estimate, unrelated to Monte Carlo outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventScenario {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Absolute price delta in USD.
    pub price_change: Decimal,
    pub timeframe: String,
    /// Estimated likelihood in `[0, 1]`.
    pub probability: f64,
    pub impact: Impact,
}

impl EventScenario {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price_change: Decimal,
        timeframe: impl Into<String>,
        probability: f64,
        impact: Impact,
    ) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(DomainError::invalid(
                "probability",
                format!("must be within [0, 1], got {probability}"),
            ));
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price_change,
            timeframe: timeframe.into(),
            probability,
            impact,
        })
    }

    #[must_use]
    pub fn probability_tier(&self) -> ProbabilityTier {
        ProbabilityTier::from_probability(self.probability)
    }

    /// Projects the event onto a strictly positive current price.
    pub fn project(&self, current_price: Price) -> Result<EventProjection, DomainError> {
        let current_price = current_price.ensure_positive("current_price")?;
        let percent_change = Percentage::of_change(self.price_change, current_price.value)?;

        Ok(EventProjection {
            event_id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            timeframe: self.timeframe.clone(),
            current_price,
            projected_price: current_price.shifted_by(self.price_change),
            price_change: self.price_change,
            percent_change,
            probability: self.probability,
            impact: self.impact,
        })
    }
}

/// An event applied to a concrete current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProjection {
    pub event_id: String,
    pub name: String,
    pub description: String,
    pub timeframe: String,
    pub current_price: Price,
    pub projected_price: Price,
    pub price_change: Decimal,
    pub percent_change: Percentage,
    pub probability: f64,
    pub impact: Impact,
}

impl EventProjection {
    /// Percent change formatted like `+4.1%`.
    pub fn percent_label(&self) -> String {
        self.percent_change.label()
    }

    #[must_use]
    pub fn probability_tier(&self) -> ProbabilityTier {
        ProbabilityTier::from_probability(self.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fed_cut() -> EventScenario {
        EventScenario::new(
            "1",
            "Fed Rate Cut",
            "Federal Reserve cuts interest rates by 0.5%",
            dec!(85.50),
            "1-2 weeks",
            0.65,
            Impact::Positive,
        )
        .unwrap()
    }

    #[test]
    fn test_project_fed_rate_cut() {
        let projection = fed_cut().project(Price::new(dec!(2085.50))).unwrap();

        assert_eq!(projection.projected_price.value, dec!(2171.00));
        assert_eq!(projection.percent_change.0.round_dp(2), dec!(4.10));
        assert_eq!(projection.percent_label(), "+4.1%");
        assert_eq!(projection.probability_tier(), ProbabilityTier::High);
    }

    #[test]
    fn test_project_rejects_non_positive_price() {
        assert!(fed_cut().project(Price::new(Decimal::ZERO)).is_err());
        assert!(fed_cut().project(Price::new(dec!(-1))).is_err());
    }

    #[test]
    fn test_probability_out_of_range() {
        let result = EventScenario::new(
            "x",
            "Bad",
            "",
            dec!(1),
            "1 day",
            1.5,
            Impact::Neutral,
        );
        assert!(result.is_err());
    }
}
