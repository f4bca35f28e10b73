//! Core domain types for the gold price what-if simulator.
//!
//! This crate holds the plain data the simulation engine consumes and
//! produces:
//! - Simulation parameters and their validation
//! - Monte Carlo scenario definitions
//! - Deterministic event scenarios and their projections
//! - Per-scenario simulation results

/// Entities with identity (scenario definitions, event scenarios).
pub mod entities;
/// Enumerations shared across crates.
pub mod enums;
/// Error types.
pub mod error;
/// Immutable value objects.
pub mod value_objects;

pub use error::DomainError;
