//! Synthetic live gold quote.
//!
//! Used when no market data feed is configured. The quote follows a bounded,
//! mean-reverting random walk whose step size depends on the trading session.
//! Unlike the Monte Carlo paths, it is clamped to a fixed band.

use crate::noise::NoiseSource;
use chrono::{DateTime, TimeZone, Timelike};
use goldsim_domain::enums::MarketSession;
use goldsim_domain::value_objects::simulation_parameters::DEFAULT_GOLD_PRICE;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of ticks retained in [`PriceHistory`].
pub const HISTORY_CAPACITY: usize = 50;

/// Tunables for [`LivePriceTicker`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Level the walk reverts to.
    pub base_price: f64,
    pub floor: f64,
    pub ceiling: f64,
    /// Fraction of the gap to `base_price` closed each tick.
    pub mean_reversion: f64,
    /// Per-tick volatility while the market is open.
    pub open_volatility: f64,
    /// Per-tick volatility outside market hours.
    pub closed_volatility: f64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_GOLD_PRICE,
            floor: 1800.0,
            ceiling: 2300.0,
            mean_reversion: 0.01,
            open_volatility: 0.003,
            closed_volatility: 0.001,
        }
    }
}

impl TickerConfig {
    #[must_use]
    pub fn volatility(&self, session: MarketSession) -> f64 {
        match session {
            MarketSession::Open => self.open_volatility,
            MarketSession::Closed => self.closed_volatility,
        }
    }
}

/// One emitted quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    /// Price rounded to cents.
    pub price: f64,
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
    pub session: MarketSession,
}

/// Rolling window of the most recent ticks.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    ticks: VecDeque<PriceTick>,
    capacity: usize,
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl PriceHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ticks: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a tick, evicting the oldest one when full.
    pub fn push(&mut self, tick: PriceTick) {
        if self.capacity == 0 {
            return;
        }
        if self.ticks.len() == self.capacity {
            self.ticks.pop_front();
        }
        self.ticks.push_back(tick);
    }

    pub fn latest(&self) -> Option<&PriceTick> {
        self.ticks.back()
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Ticks oldest first.
    pub fn to_vec(&self) -> Vec<PriceTick> {
        self.ticks.iter().copied().collect()
    }
}

/// Bounded, mean-reverting quote generator.
#[derive(Debug, Clone)]
pub struct LivePriceTicker {
    config: TickerConfig,
    last_price: f64,
    history: PriceHistory,
}

impl Default for LivePriceTicker {
    fn default() -> Self {
        Self::new(TickerConfig::default())
    }
}

impl LivePriceTicker {
    /// Starts the walk at the configured base price.
    pub fn new(config: TickerConfig) -> Self {
        Self {
            last_price: config.base_price,
            config,
            history: PriceHistory::default(),
        }
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    /// Unrounded internal price.
    #[must_use]
    pub fn last_price(&self) -> f64 {
        self.last_price
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Advances the walk one tick at time `at` and records it.
    ///
    /// The session is taken from `at`'s hour in its own time zone.
    pub fn tick<Tz, N>(&mut self, at: &DateTime<Tz>, noise: &mut N) -> PriceTick
    where
        Tz: TimeZone,
        N: NoiseSource + ?Sized,
    {
        let session = MarketSession::from_hour(at.hour());
        let max_change = self.last_price * self.config.volatility(session);
        // (U - 0.5) * max_change
        let random_walk = 0.5 * noise.next_noise() * max_change;
        let reversion = (self.config.base_price - self.last_price) * self.config.mean_reversion;

        self.last_price = (self.last_price + random_walk + reversion)
            .clamp(self.config.floor, self.config.ceiling);

        let tick = PriceTick {
            price: round_cents(self.last_price),
            timestamp_ms: at.timestamp_millis(),
            session,
        };
        self.history.push(tick);
        tick
    }
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{ScriptedNoise, UniformNoise, ZeroNoise};
    use approx::assert_relative_eq;
    use chrono::Utc;

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 12, hour, 30, 0).unwrap()
    }

    #[test]
    fn test_zero_noise_stays_at_base() {
        let mut ticker = LivePriceTicker::default();
        let tick = ticker.tick(&at_hour(10), &mut ZeroNoise);

        assert_eq!(tick.price, 2085.50);
        assert_eq!(tick.session, MarketSession::Open);
    }

    #[test]
    fn test_session_volatility() {
        // u = 1 gives a move of half the session volatility.
        let mut open = LivePriceTicker::default();
        let up = open.tick(&at_hour(11), &mut ScriptedNoise::from_shocks(&[1.0]));
        assert_relative_eq!(open.last_price(), 2085.50 * (1.0 + 0.0015), max_relative = 1e-12);
        assert!(up.price > 2085.50);

        let mut closed = LivePriceTicker::default();
        let tick = closed.tick(&at_hour(22), &mut ScriptedNoise::from_shocks(&[1.0]));
        assert_eq!(tick.session, MarketSession::Closed);
        assert_relative_eq!(closed.last_price(), 2085.50 * (1.0 + 0.0005), max_relative = 1e-12);
    }

    #[test]
    fn test_mean_reversion_pulls_toward_base() {
        let mut ticker = LivePriceTicker::new(TickerConfig {
            base_price: 2100.0,
            ..TickerConfig::default()
        });
        ticker.last_price = 2000.0;
        ticker.tick(&at_hour(12), &mut ZeroNoise);
        assert_relative_eq!(ticker.last_price(), 2001.0, max_relative = 1e-12);
    }

    #[test]
    fn test_price_stays_in_band() {
        let mut ticker = LivePriceTicker::default();
        let mut noise = UniformNoise::seeded(17);
        for i in 0..5_000 {
            let tick = ticker.tick(&at_hour(i % 24), &mut noise);
            assert!((1800.0..=2300.0).contains(&tick.price));
        }
    }

    #[test]
    fn test_history_keeps_last_fifty() {
        let mut ticker = LivePriceTicker::default();
        for _ in 0..60 {
            ticker.tick(&at_hour(10), &mut ZeroNoise);
        }
        assert_eq!(ticker.history().len(), HISTORY_CAPACITY);
        assert!(ticker.history().latest().is_some());
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(2085.504), 2085.5);
        assert_eq!(round_cents(2085.506), 2085.51);
    }
}
