//! Named Monte Carlo market scenarios.

use crate::enums::TrendDirection;
use serde::{Deserialize, Serialize};

/// How a scenario derives its annualized drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum DriftSpec {
    /// A fixed annual drift.
    Fixed(f64),
    /// Drift equal to the trend sign times this rate.
    FollowsTrend(f64),
}

impl DriftSpec {
    /// Resolves the drift for the given trend bias.
    #[must_use]
    pub fn resolve(&self, trend: TrendDirection) -> f64 {
        match *self {
            Self::Fixed(drift) => drift,
            Self::FollowsTrend(rate) => trend.sign() * rate,
        }
    }
}

/// A named market regime simulated by the what-if engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub drift: DriftSpec,
    /// Scales the run's annual volatility for this scenario.
    pub volatility_multiplier: f64,
}

impl ScenarioDefinition {
    pub fn new(name: impl Into<String>, drift: DriftSpec, volatility_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            drift,
            volatility_multiplier,
        }
    }

    /// Drift to use for a run with the given trend bias.
    #[must_use]
    pub fn effective_drift(&self, trend: TrendDirection) -> f64 {
        self.drift.resolve(trend)
    }

    /// Volatility to use for a run with the given base volatility.
    #[must_use]
    pub fn effective_volatility(&self, annual_volatility: f64) -> f64 {
        annual_volatility * self.volatility_multiplier
    }

    /// The five scenarios in display order.
    pub fn standard_set() -> Vec<Self> {
        vec![
            Self::new("Bull Market", DriftSpec::Fixed(0.10), 0.8),
            Self::new("Bear Market", DriftSpec::Fixed(-0.08), 1.2),
            Self::new("Sideways Market", DriftSpec::Fixed(0.02), 1.0),
            Self::new("High Volatility", DriftSpec::FollowsTrend(0.05), 1.5),
            Self::new("Market Crash", DriftSpec::Fixed(-0.25), 2.0),
        ]
    }
}
