pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::{SimulationSettings, VehicleConfig};
pub use constants::*;
pub use control::environment::density;
pub use control::guidance::{FlightController, FlightPhase, PitchProgram};
pub use control::launch_stages::{Stage, StageConfig, StageRole, StageStatus};
pub use control::payload::Payload;
pub use control::structure::Structure;
pub use control::vehicle::Vehicle;
pub use errors::{SimulationError, SimulationResult};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::gravity::{gravity_acceleration, CentralBody};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{Telemetry, TelemetryRecord, TelemetrySummary};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
