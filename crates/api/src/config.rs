//! Server configuration loaded from the environment.

use goldsim_domain::error::ensure_positive_price;
use goldsim_simulation::ticker::TickerConfig;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const ENV_HOST: &str = "GOLDSIM_HOST";
pub const ENV_PORT: &str = "GOLDSIM_PORT";
pub const ENV_SIMULATION_TIMEOUT_MS: &str = "GOLDSIM_SIMULATION_TIMEOUT_MS";
pub const ENV_PRICE_CACHE_TTL_SECS: &str = "GOLDSIM_PRICE_CACHE_TTL_SECS";
pub const ENV_BASE_PRICE: &str = "GOLDSIM_BASE_PRICE";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Upper bound on a single simulation request.
    pub simulation_timeout: Duration,
    /// How long a live quote is served from cache.
    pub price_cache_ttl: Duration,
    /// Synthetic ticker settings.
    pub ticker: TickerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            simulation_timeout: Duration::from_secs(5),
            price_cache_ttl: Duration::from_secs(60),
            ticker: TickerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup(ENV_HOST)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);
        let port = parse(&lookup, ENV_PORT)?.unwrap_or(defaults.port);
        let simulation_timeout = parse::<u64, _>(&lookup, ENV_SIMULATION_TIMEOUT_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.simulation_timeout);
        let price_cache_ttl = parse::<u64, _>(&lookup, ENV_PRICE_CACHE_TTL_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.price_cache_ttl);

        let mut ticker = defaults.ticker;
        if let Some(base_price) = parse::<f64, _>(&lookup, ENV_BASE_PRICE)? {
            ensure_positive_price("base_price", base_price).map_err(|e| {
                ConfigError::InvalidValue {
                    key: ENV_BASE_PRICE,
                    value: base_price.to_string(),
                    reason: e.to_string(),
                }
            })?;
            ticker.base_price = base_price;
        }

        Ok(Self {
            host,
            port,
            simulation_timeout,
            price_cache_ttl,
            ticker,
        })
    }

    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => {
            let parsed = raw.trim().parse::<T>();
            parsed.map(Some).map_err(|e| ConfigError::InvalidValue {
                key,
                value: raw,
                reason: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.price_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.ticker.base_price, 2085.50);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_HOST, "127.0.0.1"),
            (ENV_PORT, "8080"),
            (ENV_SIMULATION_TIMEOUT_MS, "250"),
            (ENV_PRICE_CACHE_TTL_SECS, "0"),
            (ENV_BASE_PRICE, "1950.25"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.simulation_timeout, Duration::from_millis(250));
        assert_eq!(config.price_cache_ttl, Duration::ZERO);
        assert_eq!(config.ticker.base_price, 1950.25);
    }

    #[test]
    fn test_malformed_port() {
        let err = ServerConfig::from_lookup(lookup(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_PORT, .. }));
    }

    #[test]
    fn test_negative_base_price() {
        let err = ServerConfig::from_lookup(lookup(&[(ENV_BASE_PRICE, "-5")])).unwrap_err();
        assert!(err.to_string().contains(ENV_BASE_PRICE));
    }
}
