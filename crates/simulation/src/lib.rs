//! Monte Carlo what-if engine for gold prices.
//!
//! This crate provides:
//! - Injectable noise sources (uniform, gaussian, scripted)
//! - Daily drift-diffusion price paths with a midpoint market shock
//! - Aggregation over the five named market scenarios
//! - Deterministic event scenario projections
//! - Macro factor blending of an external price forecast
//! - A synthetic live quote and OHLC snapshots

/// Prelude module for convenient imports.
pub mod prelude;

/// Scenario orchestration.
pub mod aggregator;
/// Fixed event scenario catalog.
pub mod catalog;
/// Error types.
pub mod error;
/// Macro factor blending.
pub mod impact;
/// Random sources.
pub mod noise;
/// Price path generation.
pub mod price_path;
/// Synthetic OHLC snapshots.
pub mod snapshot;
/// Synthetic live quote.
pub mod ticker;

pub use error::SimulationError;
