use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    launch_stages::{Stage, StageRole},
    structure::Structure,
};
use crate::constants::{CORE_PHASE_HEADING, INITIAL_HEADING, INTERIM_PHASE_HEADING};
use crate::errors::{SimulationError, SimulationResult};

/// Stage configuration currently flying. Ordered: the controller only
/// ever moves forward through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlightPhase {
    CoreSrb,
    Core,
    Interim,
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlightPhase::CoreSrb => "Core SRB",
            FlightPhase::Core => "Core",
            FlightPhase::Interim => "Interim",
        };
        f.write_str(name)
    }
}

/// Fixed heading per phase, in degrees from horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchProgram {
    pub initial: f64,
    pub core: f64,
    pub interim: f64,
}

impl PitchProgram {
    pub fn validate(&self) -> SimulationResult<()> {
        if [self.initial, self.core, self.interim]
            .iter()
            .all(|angle| angle.is_finite())
        {
            Ok(())
        } else {
            Err(SimulationError::InvalidConfiguration(format!(
                "pitch program angles must be finite: {:?}",
                self
            )))
        }
    }
}

impl Default for PitchProgram {
    fn default() -> Self {
        PitchProgram {
            initial: INITIAL_HEADING,
            core: CORE_PHASE_HEADING,
            interim: INTERIM_PHASE_HEADING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightController {
    phase: FlightPhase,
    pitch_program: PitchProgram,
}

impl FlightController {
    pub fn new(pitch_program: PitchProgram) -> Self {
        FlightController {
            phase: FlightPhase::CoreSrb,
            pitch_program,
        }
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn pitch_program(&self) -> &PitchProgram {
        &self.pitch_program
    }

    /// Phase the propellant levels call for, or `None` when the core is
    /// empty while the boosters still carry propellant.
    fn requested_phase(structure: &Structure) -> Option<FlightPhase> {
        let core = structure.prop_mass_of(StageRole::Core);
        let booster = structure.prop_mass_of(StageRole::Booster);

        if core > 0.0 && booster > 0.0 {
            Some(FlightPhase::CoreSrb)
        } else if booster <= 0.0 && core > 0.0 {
            Some(FlightPhase::Core)
        } else if core <= 0.0 && booster <= 0.0 {
            Some(FlightPhase::Interim)
        } else {
            None
        }
    }

    /// Evaluates the staging guards and applies the phase's stage commands
    /// and heading. Returns the new phase when a transition happened.
    pub fn update(&mut self, structure: &mut Structure, heading: &mut f64) -> Option<FlightPhase> {
        let requested = Self::requested_phase(structure)?;
        let previous = self.phase;
        self.phase = self.phase.max(requested);

        match self.phase {
            FlightPhase::CoreSrb => {
                Self::command(structure, StageRole::Interim, |stage| stage.shut_down());
            }
            FlightPhase::Core => {
                Self::command(structure, StageRole::Interim, |stage| stage.shut_down());
                Self::separate(structure, StageRole::Booster);
                *heading = self.pitch_program.core;
            }
            FlightPhase::Interim => {
                Self::separate(structure, StageRole::Core);
                Self::separate(structure, StageRole::Booster);
                Self::command(structure, StageRole::Interim, |stage| stage.ignite());
                *heading = self.pitch_program.interim;
            }
        }

        if self.phase != previous {
            debug!("flight phase {} -> {}", previous, self.phase);
            Some(self.phase)
        } else {
            None
        }
    }

    fn command(
        structure: &mut Structure,
        role: StageRole,
        action: impl FnOnce(&mut Stage),
    ) {
        if let Some(stage) = structure.stage_mut(role) {
            action(stage);
        }
    }

    fn separate(structure: &mut Structure, role: StageRole) {
        if let Some(stage) = structure.stage_mut(role) {
            if stage.jettison() {
                debug!("{} stage '{}' jettisoned", role, stage.name);
            }
        }
    }
}
