use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use goldsim_domain::entities::ScenarioDefinition;
use goldsim_domain::value_objects::{Price, SimulationReport};
use goldsim_simulation::error::SimulationError;
use goldsim_simulation::noise::{entropy_seed, seeded_source};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// GET /health - Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /scenarios - The Monte Carlo scenarios in result order
pub async fn list_scenarios(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<ScenarioDefinition>> {
    Json(state.aggregator.scenarios().to_vec())
}

/// POST /simulations - Run every scenario for one parameter set
pub async fn run_simulation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SimulationRequest>,
) -> Result<Json<SimulationResponse>, ApiError> {
    req.parameters.validate()?;

    let seed = req.seed.unwrap_or_else(entropy_seed);
    let SimulationRequest {
        parameters,
        noise: model,
        include_paths,
        ..
    } = req;

    let aggregator = state.aggregator.clone();
    let days = parameters.time_horizon_days;
    let job = move |cancel: &CancellationToken| {
        let mut noise = seeded_source(model, seed);
        if include_paths {
            let outcomes = aggregator.run_paths(&parameters, &mut noise, cancel)?;
            let (results, paths): (Vec<_>, Vec<_>) = outcomes
                .into_iter()
                .map(|o| {
                    let path = ScenarioPath::new(o.result.scenario_name.clone(), o.trajectory);
                    (o.result, path)
                })
                .unzip();
            Ok::<_, SimulationError>((SimulationReport::new(results), Some(paths)))
        } else {
            let report = aggregator.report(&parameters, &mut noise, cancel)?;
            Ok((report, None))
        }
    };
    let (report, paths) = run_with_timeout(state.config.simulation_timeout, days, job).await?;

    let response = SimulationResponse::new(parameters, model, seed, report, paths);
    info!(run_id = %response.run_id, seed, noise = %model, "simulation served");
    Ok(Json(response))
}

/// Runs CPU bound simulation work off the async workers.
///
/// The job's token is cancelled when `timeout` elapses, so the worker stops
/// at its next step while the caller gets [`ApiError::Timeout`].
async fn run_with_timeout<T, F>(timeout: Duration, days: u32, job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&CancellationToken) -> Result<T, SimulationError> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let worker_cancel = cancel.clone();
    let task = tokio::task::spawn_blocking(move || job(&worker_cancel));

    match tokio::time::timeout(timeout, task).await {
        Ok(joined) => Ok(joined??),
        Err(_) => {
            cancel.cancel();
            warn!(
                timeout_ms = timeout.as_millis() as u64,
                days, "simulation timed out, cancelling"
            );
            Err(ApiError::Timeout(timeout.as_millis()))
        }
    }
}

/// GET /events - Event scenarios projected onto a price
///
/// Uses the live quote unless `current_price` is given.
pub async fn events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<EventsResponse>, ApiError> {
    let price = state.reference_price(query.current_price).await;
    let current = Price::from_f64(price)?;
    let projections = state.catalog.project(current)?;

    Ok(Json(EventsResponse {
        current_price: current.value,
        events: projections.into_iter().map(EventResponse::from).collect(),
    }))
}

/// POST /impact - Blend macro factors into a base forecast
pub async fn impact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImpactRequest>,
) -> Result<Json<ImpactResponse>, ApiError> {
    let forecast = state.impact.blend(&req.base_predictions, req.factors)?;
    Ok(Json(ImpactResponse::new(forecast, Utc::now())))
}

/// GET /price/live - Synthetic live quote
pub async fn live_price(State(state): State<Arc<AppState>>) -> Json<LivePriceResponse> {
    let (tick, cached) = state.live_quote().await;
    let history = state.price_history().await;

    Json(LivePriceResponse {
        price: tick.price,
        timestamp_ms: tick.timestamp_ms,
        session: tick.session,
        currency: "USD".to_string(),
        cached,
        history,
    })
}

/// GET /price/snapshots - OHLC bars for the standard look-back periods
pub async fn snapshots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<SnapshotsResponse>, ApiError> {
    let current_price = state.reference_price(query.current_price).await;
    let snapshots = state.snapshots(current_price).await?;

    Ok(Json(SnapshotsResponse {
        current_price,
        snapshots,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_timeout_cancels_the_worker() {
        let stopped = Arc::new(AtomicBool::new(false));
        let worker_stopped = stopped.clone();

        let result: Result<(), ApiError> =
            run_with_timeout(Duration::from_millis(20), 30, move |cancel| {
                while !cancel.is_cancelled() {
                    std::thread::sleep(Duration::from_millis(1));
                }
                worker_stopped.store(true, Ordering::SeqCst);
                Err(SimulationError::Cancelled {
                    completed: 0,
                    total: 5,
                })
            })
            .await;

        assert!(matches!(result, Err(ApiError::Timeout(20))));
        for _ in 0..200 {
            if stopped.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_finished_job_passes_through() {
        let ok = run_with_timeout(Duration::from_secs(5), 30, |_| Ok(7)).await;
        assert_eq!(ok.unwrap(), 7);

        let err: Result<(), ApiError> = run_with_timeout(Duration::from_secs(5), 30, |_| {
            Err(SimulationError::invalid("time_horizon_days", "too long"))
        })
        .await;
        assert!(matches!(err, Err(ApiError::BadRequest(_))));
    }
}
