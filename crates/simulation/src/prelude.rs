//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use goldsim_simulation::prelude::*;
//! ```

// Aggregation
pub use crate::aggregator::{ScenarioAggregator, ScenarioOutcome};

// Event scenarios
pub use crate::catalog::EventScenarioCatalog;

// Errors
pub use crate::error::SimulationError;

// Macro impact
pub use crate::impact::{
    BlendedForecast, ImpactBreakdown, ImpactCoefficients, MacroFactors, MacroImpactModel,
};

// Noise sources
pub use crate::noise::{
    GaussianNoise, NoiseSource, ScriptedNoise, UniformNoise, ZeroNoise, entropy_seed,
    entropy_source, seeded_source,
};

// Price paths
pub use crate::price_path::{
    DAILY_TIME_STEP, DeterministicPricePath, PathSimulator, PathSpec, PathSummary,
    PricePathGenerator, ScenarioWalk, Trajectory,
};

// Snapshots
pub use crate::snapshot::{PeriodSnapshot, STANDARD_PERIODS, SnapshotPeriod, standard_snapshots};

// Live ticker
pub use crate::ticker::{LivePriceTicker, PriceHistory, PriceTick, TickerConfig};
