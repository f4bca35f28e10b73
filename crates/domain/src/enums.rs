use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Market trend bias applied to trend-following scenarios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Bearish,
    #[default]
    Neutral,
    Bullish,
}

impl TrendDirection {
    /// Returns the signed multiplier (-1, 0 or 1).
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Bearish => -1.0,
            Self::Neutral => 0.0,
            Self::Bullish => 1.0,
        }
    }
}

impl TryFrom<i8> for TrendDirection {
    type Error = DomainError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Bearish),
            0 => Ok(Self::Neutral),
            1 => Ok(Self::Bullish),
            other => Err(DomainError::invalid(
                "trend_direction",
                format!("expected -1, 0 or 1, got {other}"),
            )),
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Bullish => write!(f, "Bullish"),
        }
    }
}

/// Expected direction of an event's effect on price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Coarse bucket for an event probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityTier {
    Low,
    Medium,
    High,
}

impl ProbabilityTier {
    /// Buckets a probability: `>= 0.6` is high, `>= 0.4` medium, anything else low.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.6 {
            Self::High
        } else if probability >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Distribution used to draw the per-step shock of a Monte Carlo path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseModel {
    /// `u = 2U - 1` with `U ~ Uniform(0, 1)`.
    #[default]
    Uniform,
    /// `u ~ Normal(0, 1)`.
    Gaussian,
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Gaussian => write!(f, "gaussian"),
        }
    }
}

/// Trading session, used to pick the live ticker volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSession {
    Open,
    Closed,
}

impl MarketSession {
    /// Market hours are 09:00 through 16:59 local time.
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        if (9..=16).contains(&hour) {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_direction_from_sign() {
        assert_eq!(TrendDirection::try_from(-1), Ok(TrendDirection::Bearish));
        assert_eq!(TrendDirection::try_from(0), Ok(TrendDirection::Neutral));
        assert_eq!(TrendDirection::try_from(1), Ok(TrendDirection::Bullish));
        assert!(TrendDirection::try_from(2).is_err());
        assert_eq!(TrendDirection::Bearish.sign(), -1.0);
    }

    #[test]
    fn test_probability_tiers() {
        assert_eq!(ProbabilityTier::from_probability(0.65), ProbabilityTier::High);
        assert_eq!(ProbabilityTier::from_probability(0.6), ProbabilityTier::High);
        assert_eq!(ProbabilityTier::from_probability(0.45), ProbabilityTier::Medium);
        assert_eq!(ProbabilityTier::from_probability(0.2), ProbabilityTier::Low);
    }

    #[test]
    fn test_market_session_hours() {
        assert_eq!(MarketSession::from_hour(8), MarketSession::Closed);
        assert_eq!(MarketSession::from_hour(9), MarketSession::Open);
        assert_eq!(MarketSession::from_hour(16), MarketSession::Open);
        assert_eq!(MarketSession::from_hour(17), MarketSession::Closed);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(TrendDirection::Bullish.to_string(), "Bullish");
        assert_eq!(Impact::Negative.to_string(), "negative");
        assert_eq!(NoiseModel::default().to_string(), "uniform");
    }
}
