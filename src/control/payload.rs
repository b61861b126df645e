use serde::{Deserialize, Serialize};

use crate::errors::{SimulationError, SimulationResult};

/// Mass carried to the end of the run; never jettisoned.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Payload {
    mass: f64, // kg
}

impl Payload {
    pub fn new(mass: f64) -> SimulationResult<Self> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "payload mass must be a non-negative number, got {}",
                mass
            )));
        }
        Ok(Payload { mass })
    }

    pub fn get_mass(&self) -> f64 {
        self.mass
    }
}
