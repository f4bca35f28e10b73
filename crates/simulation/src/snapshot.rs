//! Synthetic OHLC snapshots for the historical price card.

use crate::error::SimulationError;
use crate::noise::NoiseSource;
use crate::ticker::round_cents;
use goldsim_domain::error::ensure_positive_price;
use serde::{Deserialize, Serialize};

/// Ounces traded in a one-day window.
const BASE_VOLUME_OZ: f64 = 1_200_000.0;

/// A look-back window and its typical volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotPeriod {
    pub label: &'static str,
    pub days: u32,
    pub volatility: f64,
}

/// 1D, 1W, 1M and 3M windows.
pub const STANDARD_PERIODS: [SnapshotPeriod; 4] = [
    SnapshotPeriod {
        label: "1D",
        days: 1,
        volatility: 0.005,
    },
    SnapshotPeriod {
        label: "1W",
        days: 7,
        volatility: 0.015,
    },
    SnapshotPeriod {
        label: "1M",
        days: 30,
        volatility: 0.03,
    },
    SnapshotPeriod {
        label: "3M",
        days: 90,
        volatility: 0.05,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSnapshot {
    pub period: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Display string such as `3.2M oz`.
    pub volume: String,
}

impl SnapshotPeriod {
    /// Draws one OHLC bar around `current_price`.
    pub fn sample<N: NoiseSource + ?Sized>(
        &self,
        current_price: f64,
        noise: &mut N,
    ) -> PeriodSnapshot {
        let max_change = current_price * self.volatility;

        let close = current_price + (noise.next_uniform() - 0.5) * max_change;
        let open = close + (noise.next_uniform() - 0.5) * max_change * 0.5;
        let high = open.max(close) + noise.next_uniform() * max_change * 0.3;
        let low = open.min(close) - noise.next_uniform() * max_change * 0.3;

        let volume_millions = BASE_VOLUME_OZ * f64::from(self.days).sqrt() / 1_000_000.0;

        PeriodSnapshot {
            period: self.label.to_string(),
            open: round_cents(open),
            high: round_cents(high),
            low: round_cents(low),
            close: round_cents(close),
            volume: format!("{volume_millions:.1}M oz"),
        }
    }
}

/// One snapshot per standard period, in period order.
pub fn standard_snapshots<N: NoiseSource + ?Sized>(
    current_price: f64,
    noise: &mut N,
) -> Result<Vec<PeriodSnapshot>, SimulationError> {
    ensure_positive_price("current_price", current_price)?;
    Ok(STANDARD_PERIODS
        .iter()
        .map(|period| period.sample(current_price, noise))
        .collect())
}
