//! Macro-economic adjustment of a base price forecast.
//!
//! The forecast itself comes from an external model; this module only blends
//! user supplied macro factors into it.

use crate::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Longest forecast horizon accepted, in days.
pub const MAX_FORECAST_DAYS: usize = 30;

/// Scenario knobs, each in its natural unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroFactors {
    /// Change in policy rate, percentage points.
    pub interest_rate_change: f64,
    /// Change in inflation, percentage points.
    pub inflation_change: f64,
    /// Change in dollar index, percent.
    pub dollar_strength_change: f64,
    /// Market volatility score, 0 to 100.
    pub market_volatility: f64,
    /// Geopolitical risk score, 0 to 100.
    pub geopolitical_risk: f64,
}

impl MacroFactors {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let all = [
            ("interest_rate_change", self.interest_rate_change),
            ("inflation_change", self.inflation_change),
            ("dollar_strength_change", self.dollar_strength_change),
            ("market_volatility", self.market_volatility),
            ("geopolitical_risk", self.geopolitical_risk),
        ];
        if let Some((field, _)) = all.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimulationError::invalid(field, "must be a finite number"));
        }

        for (field, value) in [
            ("market_volatility", self.market_volatility),
            ("geopolitical_risk", self.geopolitical_risk),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(SimulationError::invalid(
                    field,
                    format!("must be within [0, 100], got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Sensitivity of gold to each factor, per unit of the factor, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactCoefficients {
    pub interest_rate: f64,
    pub inflation: f64,
    pub dollar_strength: f64,
    pub market_volatility: f64,
    pub geopolitical_risk: f64,
}

impl Default for ImpactCoefficients {
    fn default() -> Self {
        Self {
            interest_rate: -0.5,
            inflation: 0.8,
            dollar_strength: -0.3,
            market_volatility: 0.2,
            geopolitical_risk: 0.4,
        }
    }
}

/// Dollar contribution of each factor for a single base price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    pub interest_rate: f64,
    pub inflation: f64,
    pub dollar_strength: f64,
    pub market_volatility: f64,
    pub geopolitical_risk: f64,
}

impl ImpactBreakdown {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.interest_rate
            + self.inflation
            + self.dollar_strength
            + self.market_volatility
            + self.geopolitical_risk
    }
}

/// A base forecast next to its macro-adjusted counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedForecast {
    pub base_predictions: Vec<f64>,
    pub scenario_predictions: Vec<f64>,
    pub factors: MacroFactors,
}

/// Linear macro impact model.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroImpactModel {
    pub coefficients: ImpactCoefficients,
}

impl MacroImpactModel {
    pub fn new(coefficients: ImpactCoefficients) -> Self {
        Self { coefficients }
    }

    /// Per-factor dollar impact on `base_price`.
    pub fn breakdown(&self, base_price: f64, factors: &MacroFactors) -> ImpactBreakdown {
        let c = &self.coefficients;
        let scale = base_price / 100.0;
        ImpactBreakdown {
            interest_rate: c.interest_rate * factors.interest_rate_change * scale,
            inflation: c.inflation * factors.inflation_change * scale,
            dollar_strength: c.dollar_strength * factors.dollar_strength_change * scale,
            market_volatility: c.market_volatility * factors.market_volatility * scale,
            geopolitical_risk: c.geopolitical_risk * factors.geopolitical_risk * scale,
        }
    }

    /// Adjusted price, floored at zero.
    pub fn adjust(&self, base_price: f64, factors: &MacroFactors) -> f64 {
        (base_price + self.breakdown(base_price, factors).total()).max(0.0)
    }

    /// Applies the factors to every day of a forecast.
    ///
    /// The forecast must cover between 1 and [`MAX_FORECAST_DAYS`] days.
    pub fn blend(
        &self,
        base_predictions: &[f64],
        factors: MacroFactors,
    ) -> Result<BlendedForecast, SimulationError> {
        if base_predictions.is_empty() || base_predictions.len() > MAX_FORECAST_DAYS {
            return Err(SimulationError::invalid(
                "base_predictions",
                format!(
                    "days must be between 1 and {MAX_FORECAST_DAYS}, got {}",
                    base_predictions.len()
                ),
            ));
        }
        if base_predictions.iter().any(|p| !p.is_finite()) {
            return Err(SimulationError::invalid(
                "base_predictions",
                "must contain finite prices",
            ));
        }
        factors.validate()?;

        let scenario_predictions = base_predictions
            .iter()
            .map(|&p| self.adjust(p, &factors))
            .collect();

        Ok(BlendedForecast {
            base_predictions: base_predictions.to_vec(),
            scenario_predictions,
            factors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_factors_is_identity() {
        let model = MacroImpactModel::default();
        let blended = model
            .blend(&[2000.0, 2010.0], MacroFactors::default())
            .unwrap();
        assert_eq!(blended.scenario_predictions, vec![2000.0, 2010.0]);
    }

    #[test]
    fn test_rate_hike_lowers_price() {
        let model = MacroImpactModel::default();
        let factors = MacroFactors {
            interest_rate_change: 1.0,
            ..MacroFactors::default()
        };
        // -0.5% of 2000
        assert_relative_eq!(model.adjust(2000.0, &factors), 1990.0, max_relative = 1e-12);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let model = MacroImpactModel::default();
        let factors = MacroFactors {
            interest_rate_change: -0.5,
            inflation_change: 1.0,
            dollar_strength_change: 2.0,
            market_volatility: 40.0,
            geopolitical_risk: 10.0,
        };
        let b = model.breakdown(2000.0, &factors);

        assert_relative_eq!(b.interest_rate, 5.0, max_relative = 1e-12);
        assert_relative_eq!(b.inflation, 16.0, max_relative = 1e-12);
        assert_relative_eq!(b.dollar_strength, -12.0, max_relative = 1e-12);
        assert_relative_eq!(b.market_volatility, 160.0, max_relative = 1e-12);
        assert_relative_eq!(b.geopolitical_risk, 80.0, max_relative = 1e-12);
        assert_relative_eq!(b.total(), 249.0, max_relative = 1e-12);
    }

    #[test]
    fn test_price_floored_at_zero() {
        let model = MacroImpactModel::default();
        let factors = MacroFactors {
            interest_rate_change: 500.0,
            ..MacroFactors::default()
        };
        assert_eq!(model.adjust(2000.0, &factors), 0.0);
    }

    #[test]
    fn test_horizon_bounds() {
        let model = MacroImpactModel::default();
        assert!(model.blend(&[], MacroFactors::default()).is_err());
        assert!(model.blend(&[2000.0; 31], MacroFactors::default()).is_err());
        assert!(model.blend(&[2000.0; 30], MacroFactors::default()).is_ok());
    }

    #[test]
    fn test_score_bounds() {
        let model = MacroImpactModel::default();
        let factors = MacroFactors {
            geopolitical_risk: 120.0,
            ..MacroFactors::default()
        };
        let err = model.blend(&[2000.0], factors).unwrap_err();
        assert!(err.to_string().contains("geopolitical_risk"));
    }
}
