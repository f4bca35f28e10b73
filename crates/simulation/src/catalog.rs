//! Fixed catalog of market events and their projection onto a live price.

use crate::error::SimulationError;
use goldsim_domain::entities::{EventProjection, EventScenario};
use goldsim_domain::enums::Impact;
use goldsim_domain::value_objects::Price;
use rust_decimal::Decimal;
use tracing::debug;

/// Deterministic event table shown next to the Monte Carlo scenarios.
#[derive(Debug, Clone)]
pub struct EventScenarioCatalog {
    events: Vec<EventScenario>,
}

impl EventScenarioCatalog {
    /// Builds a catalog from custom events.
    pub fn new(events: Vec<EventScenario>) -> Self {
        Self { events }
    }

    /// The five built-in events.
    ///
    /// Every entry goes through [`EventScenario::new`], so a bad literal
    /// surfaces as an error instead of a silently wrong table.
    pub fn standard() -> Result<Self, SimulationError> {
        let events = vec![
            event(
                "1",
                "Fed Rate Cut",
                "Federal Reserve cuts interest rates by 0.5%",
                Decimal::new(8550, 2),
                "1-2 weeks",
                0.65,
                Impact::Positive,
            )?,
            event(
                "2",
                "Inflation Spike",
                "CPI rises above 4% unexpectedly",
                Decimal::new(12575, 2),
                "3-5 days",
                0.35,
                Impact::Positive,
            )?,
            event(
                "3",
                "Dollar Strength",
                "USD strengthens significantly vs major currencies",
                Decimal::new(-9520, 2),
                "1 week",
                0.45,
                Impact::Negative,
            )?,
            event(
                "4",
                "Geopolitical Tension",
                "Escalation in global conflict zones",
                Decimal::new(18030, 2),
                "1-3 days",
                0.25,
                Impact::Positive,
            )?,
            event(
                "5",
                "Tech Sector Crash",
                "Major tech stocks decline 15%+",
                Decimal::new(6580, 2),
                "2-4 days",
                0.20,
                Impact::Positive,
            )?,
        ];
        Ok(Self { events })
    }

    pub fn events(&self) -> &[EventScenario] {
        &self.events
    }

    /// Projects every event onto `current_price`, in catalog order.
    pub fn project(&self, current_price: Price) -> Result<Vec<EventProjection>, SimulationError> {
        let projections = self
            .events
            .iter()
            .map(|e| e.project(current_price))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            current_price = %current_price.value,
            events = projections.len(),
            "event scenarios projected"
        );
        Ok(projections)
    }

    /// Convenience wrapper for float quotes.
    pub fn project_f64(
        &self,
        current_price: f64,
    ) -> Result<Vec<EventProjection>, SimulationError> {
        self.project(Price::from_f64(current_price)?)
    }
}

fn event(
    id: &str,
    name: &str,
    description: &str,
    price_change: Decimal,
    timeframe: &str,
    probability: f64,
    impact: Impact,
) -> Result<EventScenario, SimulationError> {
    let event = EventScenario::new(
        id,
        name,
        description,
        price_change,
        timeframe,
        probability,
        impact,
    )?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldsim_domain::enums::ProbabilityTier;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fed_rate_cut_projection() {
        let projections = EventScenarioCatalog::standard()
            .unwrap()
            .project(Price::new(dec!(2085.50)))
            .unwrap();
        let fed = &projections[0];

        assert_eq!(fed.name, "Fed Rate Cut");
        assert_eq!(fed.projected_price.value, dec!(2171.00));
        assert_eq!(fed.percent_change.0.round_dp(2), dec!(4.10));
        assert_eq!(fed.probability_tier(), ProbabilityTier::High);
    }

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = EventScenarioCatalog::standard().unwrap();
        assert_eq!(catalog.events().len(), 5);
        assert!(
            catalog
                .events()
                .iter()
                .all(|e| (0.0..=1.0).contains(&e.probability))
        );
    }

    #[test]
    fn test_event_rejects_out_of_range_probability() {
        let err = event(
            "x",
            "Bad",
            "Probability above one",
            dec!(1.00),
            "1 day",
            1.5,
            Impact::Positive,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidParameter(ref e) if e.field() == "probability"
        ));
    }

    #[test]
    fn test_catalog_order_and_literals() {
        let catalog = EventScenarioCatalog::standard().unwrap();
        let changes: Vec<Decimal> = catalog.events().iter().map(|e| e.price_change).collect();
        assert_eq!(
            changes,
            vec![dec!(85.50), dec!(125.75), dec!(-95.20), dec!(180.30), dec!(65.80)]
        );
        assert_eq!(catalog.events()[2].impact, Impact::Negative);
    }

    #[test]
    fn test_dollar_strength_is_negative() {
        let projections = EventScenarioCatalog::standard()
            .unwrap()
            .project_f64(2000.0)
            .unwrap();
        let usd = &projections[2];
        assert_eq!(usd.projected_price.value, dec!(1904.80));
        assert_eq!(usd.percent_label(), "-4.8%");
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let catalog = EventScenarioCatalog::standard().unwrap();
        assert!(matches!(
            catalog.project(Price::new(Decimal::ZERO)),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(catalog.project_f64(-1.0).is_err());
        assert!(catalog.project_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let catalog = EventScenarioCatalog::standard().unwrap();
        let a = catalog.project(Price::new(dec!(1999.99))).unwrap();
        let b = catalog.project(Price::new(dec!(1999.99))).unwrap();
        assert_eq!(a, b);
    }
}
