pub mod percentage;
pub mod price;
pub mod simulation_parameters;
pub mod simulation_result;

pub use percentage::Percentage;
pub use price::Price;
pub use simulation_parameters::SimulationParameters;
pub use simulation_result::{SimulationReport, SimulationResult};
