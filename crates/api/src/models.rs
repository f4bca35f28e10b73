//! Request and response bodies.

use chrono::{DateTime, Utc};
use goldsim_domain::entities::EventProjection;
use goldsim_domain::enums::{Impact, MarketSession, NoiseModel, ProbabilityTier};
use goldsim_domain::value_objects::{SimulationParameters, SimulationReport, SimulationResult};
use goldsim_simulation::impact::{BlendedForecast, MacroFactors};
use goldsim_simulation::price_path::Trajectory;
use goldsim_simulation::snapshot::PeriodSnapshot;
use goldsim_simulation::ticker::PriceTick;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `POST /simulations` body.
///
/// Parameter fields sit at the top level and default individually.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationRequest {
    #[serde(flatten)]
    pub parameters: SimulationParameters,
    /// Fixed seed for a reproducible run. Drawn from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub noise: NoiseModel,
    /// Return every scenario's full path.
    #[serde(default)]
    pub include_paths: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPath {
    pub scenario_name: String,
    pub prices: Vec<f64>,
    pub shock_step: Option<usize>,
}

impl ScenarioPath {
    pub fn new(scenario_name: String, trajectory: Trajectory) -> Self {
        Self {
            scenario_name,
            prices: trajectory.prices,
            shock_step: trajectory.shock_step,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub run_id: Uuid,
    pub parameters: SimulationParameters,
    pub noise: NoiseModel,
    pub seed: u64,
    pub results: Vec<SimulationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<ScenarioPath>>,
    pub best_scenario: Option<String>,
    pub worst_scenario: Option<String>,
    pub mean_roi_percent: f64,
}

impl SimulationResponse {
    pub fn new(
        parameters: SimulationParameters,
        noise: NoiseModel,
        seed: u64,
        report: SimulationReport,
        paths: Option<Vec<ScenarioPath>>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            parameters,
            noise,
            seed,
            best_scenario: report.best().map(|r| r.scenario_name.clone()),
            worst_scenario: report.worst().map(|r| r.scenario_name.clone()),
            mean_roi_percent: report.mean_roi(),
            results: report.results,
            paths,
        }
    }
}

/// Optional price override shared by the event and snapshot endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PriceQuery {
    pub current_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub timeframe: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub projected_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_change: Decimal,
    pub percent_change: f64,
    /// Signed display form such as `+4.1%`.
    pub percent_label: String,
    pub probability: f64,
    pub probability_tier: ProbabilityTier,
    pub impact: Impact,
}

impl From<EventProjection> for EventResponse {
    fn from(p: EventProjection) -> Self {
        Self {
            percent_label: p.percent_label(),
            probability_tier: p.probability_tier(),
            percent_change: p.percent_change.to_f64(),
            id: p.event_id,
            name: p.name,
            description: p.description,
            timeframe: p.timeframe,
            current_price: p.current_price.value,
            projected_price: p.projected_price.value,
            price_change: p.price_change,
            probability: p.probability,
            impact: p.impact,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    pub events: Vec<EventResponse>,
}

/// `POST /impact` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ImpactRequest {
    /// One base forecast price per day.
    pub base_predictions: Vec<f64>,
    #[serde(default)]
    pub factors: MacroFactors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactResponse {
    pub dates: Vec<String>,
    pub base_predictions: Vec<f64>,
    pub scenario_predictions: Vec<f64>,
    pub factors: MacroFactors,
}

impl ImpactResponse {
    /// Labels day `i` of the forecast as `start + i + 1` days.
    pub fn new(forecast: BlendedForecast, start: DateTime<Utc>) -> Self {
        let dates = (1..=forecast.base_predictions.len())
            .map(|day| {
                (start + chrono::Duration::days(day as i64))
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .collect();
        Self {
            dates,
            base_predictions: forecast.base_predictions,
            scenario_predictions: forecast.scenario_predictions,
            factors: forecast.factors,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivePriceResponse {
    pub price: f64,
    pub timestamp_ms: i64,
    pub session: MarketSession,
    pub currency: String,
    /// True when served from the quote cache.
    pub cached: bool,
    pub history: Vec<PriceTick>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotsResponse {
    pub current_price: f64,
    pub snapshots: Vec<PeriodSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}
