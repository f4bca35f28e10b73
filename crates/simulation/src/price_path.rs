//! Monte Carlo price paths.
//!
//! A path is an Euler discretisation of a drift-diffusion process with one
//! step per day:
//!
//! ```text
//! price += price * (drift * dt + volatility * sqrt(dt) * u)
//! ```
//!
//! where `u` comes from a [`NoiseSource`]. An optional market shock multiplies
//! the price once, right after the diffusion update of step `days / 2`.
//! No floor is applied, so crash scenarios may go arbitrarily low.

use crate::noise::NoiseSource;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// One trading day expressed in years.
pub const DAILY_TIME_STEP: f64 = 1.0 / 365.0;

/// Inputs of a single path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSpec {
    pub start_price: f64,
    /// Number of steps. Zero yields a single-point path.
    pub days: usize,
    /// Annualized drift (mu).
    pub drift: f64,
    /// Annualized volatility (sigma).
    pub volatility: f64,
    /// Jump applied at the midpoint step, in percent. Zero disables it.
    pub shock_percent: f64,
}

impl PathSpec {
    pub fn new(start_price: f64, days: usize, drift: f64, volatility: f64) -> Self {
        Self {
            start_price,
            days,
            drift,
            volatility,
            shock_percent: 0.0,
        }
    }

    #[must_use]
    pub fn with_shock(mut self, shock_percent: f64) -> Self {
        self.shock_percent = shock_percent;
        self
    }

    /// Step index that receives the shock, if any.
    #[must_use]
    pub fn shock_step(&self) -> Option<usize> {
        (self.shock_percent != 0.0 && self.days > 0).then_some(self.days / 2)
    }
}

/// Final price and running extrema of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSummary {
    pub final_price: f64,
    pub max_price: f64,
    pub min_price: f64,
}

impl PathSummary {
    fn flat(price: f64) -> Self {
        Self {
            final_price: price,
            max_price: price,
            min_price: price,
        }
    }

    fn observe(&mut self, price: f64) {
        self.final_price = price;
        self.max_price = self.max_price.max(price);
        self.min_price = self.min_price.min(price);
    }
}

/// Every price visited by a path, the start price first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub prices: Vec<f64>,
    pub shock_step: Option<usize>,
}

impl Trajectory {
    /// Summary recomputed from the recorded points.
    pub fn summary(&self) -> PathSummary {
        let mut points = self.prices.iter().copied();
        let Some(first) = points.next() else {
            return PathSummary::flat(0.0);
        };
        let mut summary = PathSummary::flat(first);
        points.for_each(|p| summary.observe(p));
        summary
    }

    /// Number of simulated steps (points minus the start).
    #[must_use]
    pub fn steps(&self) -> usize {
        self.prices.len().saturating_sub(1)
    }
}

/// Generates price paths on a fixed time grid.
#[derive(Debug, Clone, Copy)]
pub struct PathSimulator {
    /// Step size in years.
    pub time_step: f64,
}

impl Default for PathSimulator {
    fn default() -> Self {
        Self {
            time_step: DAILY_TIME_STEP,
        }
    }
}

impl PathSimulator {
    pub fn new(time_step: f64) -> Self {
        Self { time_step }
    }

    /// Runs a path and returns only its summary.
    pub fn simulate<N: NoiseSource + ?Sized>(
        &self,
        spec: &PathSpec,
        noise: &mut N,
    ) -> PathSummary {
        let mut summary = PathSummary::flat(spec.start_price);
        self.walk(spec, noise, None, |price| summary.observe(price));
        summary
    }

    /// Like [`PathSimulator::simulate`] but checks `cancel` before every step.
    ///
    /// Returns `None` as soon as cancellation is observed.
    pub fn simulate_until<N: NoiseSource + ?Sized>(
        &self,
        spec: &PathSpec,
        noise: &mut N,
        cancel: &CancellationToken,
    ) -> Option<PathSummary> {
        let mut summary = PathSummary::flat(spec.start_price);
        self.walk(spec, noise, Some(cancel), |price| summary.observe(price))
            .then_some(summary)
    }

    /// Runs a path and records every point.
    ///
    /// Consumes the noise source exactly like [`PathSimulator::simulate`], so
    /// the two agree for identical sources.
    pub fn trajectory<N: NoiseSource + ?Sized>(
        &self,
        spec: &PathSpec,
        noise: &mut N,
    ) -> Trajectory {
        let mut prices = Vec::with_capacity(spec.days + 1);
        prices.push(spec.start_price);
        self.walk(spec, noise, None, |price| prices.push(price));
        Trajectory {
            prices,
            shock_step: spec.shock_step(),
        }
    }

    /// Cancellable [`PathSimulator::trajectory`].
    pub fn trajectory_until<N: NoiseSource + ?Sized>(
        &self,
        spec: &PathSpec,
        noise: &mut N,
        cancel: &CancellationToken,
    ) -> Option<Trajectory> {
        let mut prices = Vec::with_capacity(spec.days + 1);
        prices.push(spec.start_price);
        let finished = self.walk(spec, noise, Some(cancel), |price| prices.push(price));
        finished.then(|| Trajectory {
            prices,
            shock_step: spec.shock_step(),
        })
    }

    /// Steps through the path, handing every new price to `visit`.
    ///
    /// Returns `false` if `cancel` fired before the last step.
    fn walk<N, F>(
        &self,
        spec: &PathSpec,
        noise: &mut N,
        cancel: Option<&CancellationToken>,
        mut visit: F,
    ) -> bool
    where
        N: NoiseSource + ?Sized,
        F: FnMut(f64),
    {
        let dt = self.time_step;
        let drift_term = spec.drift * dt;
        let vol_term = spec.volatility * dt.sqrt();
        let shock_step = spec.shock_step();
        let shock_factor = 1.0 + spec.shock_percent / 100.0;

        let mut price = spec.start_price;
        for step in 0..spec.days {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                return false;
            }

            let u = noise.next_noise();
            price += price * (drift_term + vol_term * u);

            if shock_step == Some(step) {
                price *= shock_factor;
            }

            visit(price);
        }
        true
    }
}

/// Anything that can produce a whole price path.
pub trait PricePathGenerator {
    /// Returns up to `steps + 1` prices, the start price first.
    fn generate(&mut self, steps: usize) -> Vec<f64>;
}

/// A [`PathSpec`] bundled with the noise that drives it.
///
/// [`PathSpec::days`] is replaced by the requested number of steps.
#[derive(Debug, Clone)]
pub struct ScenarioWalk<N> {
    pub simulator: PathSimulator,
    pub spec: PathSpec,
    noise: N,
}

impl<N: NoiseSource> ScenarioWalk<N> {
    pub fn new(spec: PathSpec, noise: N) -> Self {
        Self {
            simulator: PathSimulator::default(),
            spec,
            noise,
        }
    }
}

impl<N: NoiseSource> PricePathGenerator for ScenarioWalk<N> {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        let spec = PathSpec {
            days: steps,
            ..self.spec
        };
        self.simulator.trajectory(&spec, &mut self.noise).prices
    }
}

/// Replays recorded prices, truncated to the requested length.
#[derive(Debug, Clone, Default)]
pub struct DeterministicPricePath {
    pub prices: Vec<f64>,
}

impl DeterministicPricePath {
    pub fn new(prices: Vec<f64>) -> Self {
        Self { prices }
    }
}

impl PricePathGenerator for DeterministicPricePath {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        self.prices.iter().copied().take(steps + 1).collect()
    }
}
