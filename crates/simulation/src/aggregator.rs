//! Runs every named market scenario for one set of parameters.

use crate::error::SimulationError;
use crate::noise::{NoiseSource, seeded_source};
use crate::price_path::{PathSimulator, PathSpec, PathSummary, Trajectory};
use goldsim_domain::entities::ScenarioDefinition;
use goldsim_domain::enums::NoiseModel;
use goldsim_domain::value_objects::{SimulationParameters, SimulationReport, SimulationResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// A scenario result together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub result: SimulationResult,
    pub trajectory: Trajectory,
}

/// Orchestrates [`PathSimulator`] across the fixed scenario set.
#[derive(Debug, Clone)]
pub struct ScenarioAggregator {
    scenarios: Vec<ScenarioDefinition>,
    simulator: PathSimulator,
}

impl Default for ScenarioAggregator {
    fn default() -> Self {
        Self::new(PathSimulator::default())
    }
}

impl ScenarioAggregator {
    /// Creates an aggregator over the standard five scenarios.
    pub fn new(simulator: PathSimulator) -> Self {
        Self {
            scenarios: ScenarioDefinition::standard_set(),
            simulator,
        }
    }

    /// Scenarios in the order results are returned.
    pub fn scenarios(&self) -> &[ScenarioDefinition] {
        &self.scenarios
    }

    /// Runs every scenario sequentially, drawing from a single noise source.
    ///
    /// Results come back in scenario order: Bull, Bear, Sideways,
    /// High Volatility, Crash.
    pub fn run_all<N: NoiseSource + ?Sized>(
        &self,
        params: &SimulationParameters,
        noise: &mut N,
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        self.run_all_cancellable(params, noise, &CancellationToken::new())
    }

    /// Like [`ScenarioAggregator::run_all`] but stops at the next step once
    /// `cancel` is triggered.
    ///
    /// `completed` in the returned error counts the scenarios that finished.
    pub fn run_all_cancellable<N: NoiseSource + ?Sized>(
        &self,
        params: &SimulationParameters,
        noise: &mut N,
        cancel: &CancellationToken,
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        params.validate()?;
        let total = self.scenarios.len();
        let mut results = Vec::with_capacity(total);

        for (index, scenario) in self.scenarios.iter().enumerate() {
            let summary = self
                .simulator
                .simulate_until(&path_spec(scenario, params), noise, cancel)
                .ok_or(SimulationError::Cancelled {
                    completed: index,
                    total,
                })?;
            results.push(to_result(scenario, params, &summary));
        }

        log_run(params, &results);
        Ok(results)
    }

    /// Runs every scenario and keeps the full trajectories.
    pub fn run_paths<N: NoiseSource + ?Sized>(
        &self,
        params: &SimulationParameters,
        noise: &mut N,
        cancel: &CancellationToken,
    ) -> Result<Vec<ScenarioOutcome>, SimulationError> {
        params.validate()?;
        let total = self.scenarios.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, scenario) in self.scenarios.iter().enumerate() {
            let trajectory = self
                .simulator
                .trajectory_until(&path_spec(scenario, params), noise, cancel)
                .ok_or(SimulationError::Cancelled {
                    completed: index,
                    total,
                })?;
            let result = to_result(scenario, params, &trajectory.summary());
            outcomes.push(ScenarioOutcome { result, trajectory });
        }

        Ok(outcomes)
    }

    /// Runs every scenario with its own generator seeded from `seed + index`.
    ///
    /// Produces exactly what [`ScenarioAggregator::run_all_parallel`] does for
    /// the same seed.
    pub fn run_all_seeded(
        &self,
        params: &SimulationParameters,
        model: NoiseModel,
        seed: u64,
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        params.validate()?;
        let results: Vec<SimulationResult> = self
            .scenarios
            .iter()
            .enumerate()
            .map(|(index, scenario)| self.run_isolated(scenario, params, model, seed, index))
            .collect();

        log_run(params, &results);
        Ok(results)
    }

    /// Runs the scenarios concurrently on the rayon pool.
    ///
    /// Each scenario owns its generator, so output order and values match
    /// [`ScenarioAggregator::run_all_seeded`].
    pub fn run_all_parallel(
        &self,
        params: &SimulationParameters,
        model: NoiseModel,
        seed: u64,
    ) -> Result<Vec<SimulationResult>, SimulationError> {
        params.validate()?;
        let results: Vec<SimulationResult> = self
            .scenarios
            .par_iter()
            .enumerate()
            .map(|(index, scenario)| self.run_isolated(scenario, params, model, seed, index))
            .collect();

        log_run(params, &results);
        Ok(results)
    }

    /// Runs every scenario and wraps the results in a report.
    pub fn report<N: NoiseSource + ?Sized>(
        &self,
        params: &SimulationParameters,
        noise: &mut N,
        cancel: &CancellationToken,
    ) -> Result<SimulationReport, SimulationError> {
        self.run_all_cancellable(params, noise, cancel)
            .map(SimulationReport::new)
    }

    fn run_isolated(
        &self,
        scenario: &ScenarioDefinition,
        params: &SimulationParameters,
        model: NoiseModel,
        seed: u64,
        index: usize,
    ) -> SimulationResult {
        let mut noise = seeded_source(model, seed.wrapping_add(index as u64));
        let summary = self
            .simulator
            .simulate(&path_spec(scenario, params), &mut noise);
        to_result(scenario, params, &summary)
    }
}

fn path_spec(scenario: &ScenarioDefinition, params: &SimulationParameters) -> PathSpec {
    PathSpec::new(
        params.current_price,
        params.time_horizon_days as usize,
        scenario.effective_drift(params.trend_direction),
        scenario.effective_volatility(params.annual_volatility),
    )
    .with_shock(params.market_shock_percent)
}

fn to_result(
    scenario: &ScenarioDefinition,
    params: &SimulationParameters,
    summary: &PathSummary,
) -> SimulationResult {
    let start = params.current_price;
    let volatility = scenario.effective_volatility(params.annual_volatility);
    let result = SimulationResult {
        scenario_name: scenario.name.clone(),
        final_price: summary.final_price,
        max_price: summary.max_price,
        min_price: summary.min_price,
        volatility_percent: volatility * 100.0,
        roi_percent: (summary.final_price - start) / start * 100.0,
    };

    debug!(
        scenario = %result.scenario_name,
        final_price = result.final_price,
        roi_percent = result.roi_percent,
        "scenario simulated"
    );
    result
}

fn log_run(params: &SimulationParameters, results: &[SimulationResult]) {
    info!(
        scenarios = results.len(),
        days = params.time_horizon_days,
        start_price = params.current_price,
        "what-if simulation completed"
    );
}
