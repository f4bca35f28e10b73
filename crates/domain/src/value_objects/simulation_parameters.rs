//! Inputs for one what-if simulation run.

use crate::enums::TrendDirection;
use crate::error::{DomainError, ensure_positive_price};
use serde::{Deserialize, Serialize};

/// Reference gold price used when no live quote is available.
pub const DEFAULT_GOLD_PRICE: f64 = 2085.50;

/// Slider range offered for the time horizon, in days.
pub const TIME_HORIZON_RANGE: (u32, u32) = (1, 365);
/// Slider range offered for annual volatility.
pub const VOLATILITY_RANGE: (f64, f64) = (0.05, 0.50);
/// Slider range offered for the market shock, in percent.
pub const SHOCK_RANGE: (f64, f64) = (-50.0, 50.0);

/// Parameters shared by every scenario of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Days to simulate, one step per day.
    pub time_horizon_days: u32,
    /// Annualized volatility as a fraction (0.15 = 15 %).
    pub annual_volatility: f64,
    /// Bias for the trend-following scenario.
    pub trend_direction: TrendDirection,
    /// One-off jump applied at the midpoint step, in percent.
    pub market_shock_percent: f64,
    /// Starting price of every path.
    pub current_price: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            time_horizon_days: 30,
            annual_volatility: 0.15,
            trend_direction: TrendDirection::Neutral,
            market_shock_percent: 0.0,
            current_price: DEFAULT_GOLD_PRICE,
        }
    }
}

impl SimulationParameters {
    /// Creates default parameters starting at `current_price`.
    #[must_use]
    pub fn new(current_price: f64) -> Self {
        Self {
            current_price,
            ..Self::default()
        }
    }

    /// Sets the time horizon.
    #[must_use]
    pub fn with_time_horizon(mut self, days: u32) -> Self {
        self.time_horizon_days = days;
        self
    }

    /// Sets the annual volatility.
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.annual_volatility = volatility;
        self
    }

    /// Sets the trend direction.
    #[must_use]
    pub fn with_trend(mut self, trend: TrendDirection) -> Self {
        self.trend_direction = trend;
        self
    }

    /// Sets the market shock.
    #[must_use]
    pub fn with_shock(mut self, shock_percent: f64) -> Self {
        self.market_shock_percent = shock_percent;
        self
    }

    /// Rejects parameters the model cannot run on.
    ///
    /// The horizon must lie inside [`TIME_HORIZON_RANGE`]. Volatility and
    /// shock only need to be usable numbers; their slider ranges are exported
    /// for callers that want to clamp input.
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive_price("current_price", self.current_price)?;

        if self.time_horizon_days < 1 {
            return Err(DomainError::invalid(
                "time_horizon_days",
                "must be at least one day",
            ));
        }

        if self.time_horizon_days > TIME_HORIZON_RANGE.1 {
            return Err(DomainError::invalid(
                "time_horizon_days",
                format!(
                    "must be at most {} days, got {}",
                    TIME_HORIZON_RANGE.1, self.time_horizon_days
                ),
            ));
        }

        if !self.annual_volatility.is_finite() || self.annual_volatility < 0.0 {
            return Err(DomainError::invalid(
                "annual_volatility",
                format!("must be a non-negative number, got {}", self.annual_volatility),
            ));
        }

        if !self.market_shock_percent.is_finite() {
            return Err(DomainError::invalid(
                "market_shock_percent",
                "must be a finite number",
            ));
        }

        Ok(())
    }

    /// Returns a copy with every field pulled into the slider ranges.
    #[must_use]
    pub fn clamped_to_ui_ranges(mut self) -> Self {
        self.time_horizon_days = self
            .time_horizon_days
            .clamp(TIME_HORIZON_RANGE.0, TIME_HORIZON_RANGE.1);
        self.annual_volatility = self
            .annual_volatility
            .clamp(VOLATILITY_RANGE.0, VOLATILITY_RANGE.1);
        self.market_shock_percent = self
            .market_shock_percent
            .clamp(SHOCK_RANGE.0, SHOCK_RANGE.1);
        self
    }
}
