use chrono::Local;
use goldsim_simulation::aggregator::ScenarioAggregator;
use goldsim_simulation::catalog::EventScenarioCatalog;
use goldsim_simulation::error::SimulationError;
use goldsim_simulation::impact::MacroImpactModel;
use goldsim_simulation::noise::UniformNoise;
use goldsim_simulation::snapshot::{PeriodSnapshot, standard_snapshots};
use goldsim_simulation::ticker::{LivePriceTicker, PriceTick};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};

use crate::config::ServerConfig;

/// The synthetic quote generator and the randomness it consumes.
struct LiveFeed {
    ticker: LivePriceTicker,
    noise: UniformNoise,
}

#[derive(Debug, Clone, Copy)]
struct CachedQuote {
    fetched_at: Instant,
    tick: PriceTick,
}

/// Shared state for all handlers
pub struct AppState {
    pub config: ServerConfig,

    // Stateless engines, cloned into blocking tasks
    pub aggregator: ScenarioAggregator,
    pub catalog: EventScenarioCatalog,
    pub impact: MacroImpactModel,

    // Only the live feed needs mutation
    live: Mutex<LiveFeed>,
    quote_cache: RwLock<Option<CachedQuote>>,
}

impl AppState {
    /// State with an OS-seeded live feed.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, SimulationError> {
        Self::with_noise(config, UniformNoise::from_os())
    }

    /// State whose live feed replays from `seed`.
    pub fn seeded(config: ServerConfig, seed: u64) -> Result<Arc<Self>, SimulationError> {
        Self::with_noise(config, UniformNoise::seeded(seed))
    }

    fn with_noise(
        config: ServerConfig,
        noise: UniformNoise,
    ) -> Result<Arc<Self>, SimulationError> {
        let ticker = LivePriceTicker::new(config.ticker);
        Ok(Arc::new(Self {
            config,
            aggregator: ScenarioAggregator::default(),
            catalog: EventScenarioCatalog::standard()?,
            impact: MacroImpactModel::default(),
            live: Mutex::new(LiveFeed { ticker, noise }),
            quote_cache: RwLock::new(None),
        }))
    }

    /// Current quote, served from cache while younger than the configured TTL.
    ///
    /// The flag is true when the quote came from the cache. Concurrent misses
    /// advance the ticker once; the rest wait on the feed and get its quote.
    pub async fn live_quote(&self) -> (PriceTick, bool) {
        if let Some(tick) = self.fresh_quote().await {
            return (tick, true);
        }

        let mut guard = self.live.lock().await;
        // Refreshed while we waited for the feed
        if let Some(tick) = self.fresh_quote().await {
            return (tick, true);
        }

        let feed = &mut *guard;
        let tick = feed.ticker.tick(&Local::now(), &mut feed.noise);
        *self.quote_cache.write().await = Some(CachedQuote {
            fetched_at: Instant::now(),
            tick,
        });
        (tick, false)
    }

    async fn fresh_quote(&self) -> Option<PriceTick> {
        let cached = (*self.quote_cache.read().await)?;
        (cached.fetched_at.elapsed() < self.config.price_cache_ttl).then_some(cached.tick)
    }

    /// Ticks emitted so far, oldest first.
    pub async fn price_history(&self) -> Vec<PriceTick> {
        self.live.lock().await.ticker.history().to_vec()
    }

    /// Uses `requested` when given, otherwise the live quote.
    pub async fn reference_price(&self, requested: Option<f64>) -> f64 {
        match requested {
            Some(price) => price,
            None => self.live_quote().await.0.price,
        }
    }

    /// Period snapshots around `current_price`, drawn from the live feed's noise.
    pub async fn snapshots(
        &self,
        current_price: f64,
    ) -> Result<Vec<PeriodSnapshot>, SimulationError> {
        let mut guard = self.live.lock().await;
        standard_snapshots(current_price, &mut guard.noise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_misses_tick_once() {
        let state = AppState::seeded(ServerConfig::default(), 11).unwrap();

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let state = state.clone();
                tokio::spawn(async move { state.live_quote().await })
            })
            .collect();
        let mut quotes = Vec::new();
        for task in tasks {
            quotes.push(task.await.unwrap());
        }

        let fresh = quotes.iter().filter(|(_, cached)| !cached).count();
        assert_eq!(fresh, 1);
        assert!(quotes.iter().all(|(tick, _)| *tick == quotes[0].0));
        assert_eq!(state.price_history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_quote_ticks_again() {
        let config = ServerConfig {
            price_cache_ttl: Duration::ZERO,
            ..ServerConfig::default()
        };
        let state = AppState::seeded(config, 3).unwrap();

        let (_, first_cached) = state.live_quote().await;
        let (_, second_cached) = state.live_quote().await;
        assert!(!first_cached);
        assert!(!second_cached);
        assert_eq!(state.price_history().await.len(), 2);
    }
}
