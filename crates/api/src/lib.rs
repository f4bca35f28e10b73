//! HTTP surface for the gold price simulator.
//!
//! Exposes the what-if Monte Carlo run, the event scenario table, macro
//! impact blending and the synthetic live quote under `/api/v1`.

/// Server configuration.
pub mod config;
/// Error types.
pub mod error;
/// Request handlers.
pub mod handlers;
/// API request/response models.
pub mod models;
/// Route definitions.
pub mod routes;
/// Server startup.
pub mod server;
/// Application state.
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::router;
pub use server::ApiServer;
pub use state::AppState;
