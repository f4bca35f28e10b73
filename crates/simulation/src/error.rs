//! Simulation error types.

use goldsim_domain::DomainError;
use thiserror::Error;

/// Errors returned by the simulation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Input parameters failed validation.
    #[error(transparent)]
    InvalidParameter(#[from] DomainError),
    /// The run was cancelled before every scenario finished.
    #[error("simulation cancelled after {completed} of {total} scenarios")]
    Cancelled {
        /// Scenarios finished before cancellation was observed.
        completed: usize,
        /// Scenarios requested.
        total: usize,
    },
}

impl SimulationError {
    /// Shorthand for an invalid parameter error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter(DomainError::invalid(field, reason))
    }
}
