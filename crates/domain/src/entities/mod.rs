pub mod event_scenario;
pub mod scenario_definition;

pub use event_scenario::{EventProjection, EventScenario};
pub use scenario_definition::{DriftSpec, ScenarioDefinition};
