//! Vehicle and run configuration, loadable from YAML.
//!
//! ```yaml
//! body: { mass: 5.9722e24, radius: 6.371e6 }
//! payload_mass: 0.0
//! pitch_program: { initial: 90.0, core: 150.0, interim: 30.0 }
//! simulation: { time_step: 0.1, duration: 1000.0 }
//! stages:
//!   - { name: Core, role: core, dry_mass: 85300, prop_mass: 987500,
//!       mass_flow: -2060, exhaust_velocity: -4292, reference_area: 77.04 }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::constants::{
    StageParameters, CORE_STAGE, INTERIM_CRYOGENIC_STAGE, SIMULATION_DURATION,
    SOLID_ROCKET_BOOSTERS, TIME_STEP,
};
use crate::control::guidance::PitchProgram;
use crate::control::launch_stages::{StageConfig, StageRole};
use crate::errors::{SimulationError, SimulationResult};
use crate::trajectory_system::gravity::CentralBody;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub time_step: f64, // s
    pub duration: f64,  // s
}

impl SimulationSettings {
    pub fn validate(&self) -> SimulationResult<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "duration must be a non-negative number, got {}",
                self.duration
            )));
        }
        Ok(())
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            time_step: TIME_STEP,
            duration: SIMULATION_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub body: CentralBody,
    pub payload_mass: f64,
    pub pitch_program: PitchProgram,
    pub simulation: SimulationSettings,
    pub stages: Vec<StageConfig>,
}

fn stage_config(name: &str, role: StageRole, parameters: StageParameters) -> StageConfig {
    let (dry_mass, prop_mass, mass_flow, exhaust_velocity, reference_area) = parameters;
    StageConfig::new(
        name,
        role,
        dry_mass,
        prop_mass,
        mass_flow,
        exhaust_velocity,
        reference_area,
    )
}

impl VehicleConfig {
    /// SLS Block 1: core stage, twin solid rocket boosters and the interim
    /// cryogenic propulsion stage, launched from Earth.
    pub fn sls_block1() -> Self {
        VehicleConfig {
            body: CentralBody::earth(),
            payload_mass: 0.0,
            pitch_program: PitchProgram::default(),
            simulation: SimulationSettings::default(),
            stages: vec![
                stage_config("Core", StageRole::Core, CORE_STAGE),
                stage_config("SRB", StageRole::Booster, SOLID_ROCKET_BOOSTERS),
                stage_config("Interim", StageRole::Interim, INTERIM_CRYOGENIC_STAGE),
            ],
        }
    }

    pub fn from_yaml_str(yaml: &str) -> SimulationResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            SimulationError::ConfigFile(format!("cannot open {}: {}", path.display(), err))
        })?;
        Ok(serde_yaml::from_reader(file)?)
    }

    pub fn to_yaml_string(&self) -> SimulationResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Default for VehicleConfig {
    fn default() -> Self {
        VehicleConfig::sls_block1()
    }
}
