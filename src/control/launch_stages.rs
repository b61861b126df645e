use serde::{Deserialize, Serialize};
use std::fmt;

use super::propulsion::PropulsionSystem;
use crate::errors::{SimulationError, SimulationResult};

/// Position a stage plays in the flight sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageRole {
    Core,
    Booster,
    Interim,
    Exploration,
}

impl fmt::Display for StageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageRole::Core => "Core",
            StageRole::Booster => "SRB",
            StageRole::Interim => "Interim",
            StageRole::Exploration => "Exploration",
        };
        f.write_str(name)
    }
}

/// `Jettisoned` is terminal, so a detached stage can never fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    Firing,
    Idle,
    Jettisoned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,
    pub role: StageRole,
    pub dry_mass: f64,         // kg
    pub prop_mass: f64,        // kg
    pub mass_flow: f64,        // kg/s, negative while consuming
    pub exhaust_velocity: f64, // m/s, negative by convention
    pub reference_area: f64,   // m²
}

impl StageConfig {
    pub fn new(
        name: impl Into<String>,
        role: StageRole,
        dry_mass: f64,
        prop_mass: f64,
        mass_flow: f64,
        exhaust_velocity: f64,
        reference_area: f64,
    ) -> Self {
        StageConfig {
            name: name.into(),
            role,
            dry_mass,
            prop_mass,
            mass_flow,
            exhaust_velocity,
            reference_area,
        }
    }

    pub fn validate(&self) -> SimulationResult<()> {
        let invalid = |reason: String| -> SimulationResult<()> {
            Err(SimulationError::InvalidConfiguration(format!(
                "stage '{}': {}",
                self.name, reason
            )))
        };

        let fields = [
            ("dry_mass", self.dry_mass),
            ("prop_mass", self.prop_mass),
            ("mass_flow", self.mass_flow),
            ("exhaust_velocity", self.exhaust_velocity),
            ("reference_area", self.reference_area),
        ];
        if let Some((field, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return invalid(format!("{} must be finite, got {}", field, value));
        }
        if self.dry_mass < 0.0 {
            return invalid(format!("dry_mass must not be negative, got {}", self.dry_mass));
        }
        if self.prop_mass < 0.0 {
            return invalid(format!("prop_mass must not be negative, got {}", self.prop_mass));
        }
        if self.reference_area < 0.0 {
            return invalid(format!(
                "reference_area must not be negative, got {}",
                self.reference_area
            ));
        }
        if self.mass_flow > 0.0 || (self.prop_mass > 0.0 && self.mass_flow == 0.0) {
            return invalid(format!(
                "mass_flow must be negative for a stage carrying propellant, got {}",
                self.mass_flow
            ));
        }
        if self.exhaust_velocity > 0.0 {
            return invalid(format!(
                "exhaust_velocity must not be positive, got {}",
                self.exhaust_velocity
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub role: StageRole,
    pub dry_mass: f64,
    pub reference_area: f64,
    pub total_mass: f64,
    pub propulsion: PropulsionSystem,
    status: StageStatus,
    initial_prop_mass: f64,
}

impl Stage {
    /// Exploration stages are built idle: nothing in the flight sequence
    /// ignites them, so they ride along as inert mass.
    pub fn new(config: StageConfig) -> SimulationResult<Self> {
        config.validate()?;
        let status = match config.role {
            StageRole::Exploration => StageStatus::Idle,
            _ => StageStatus::Firing,
        };
        let mut propulsion =
            PropulsionSystem::new(config.prop_mass, config.mass_flow, config.exhaust_velocity);
        propulsion.set_firing(status == StageStatus::Firing);

        Ok(Stage {
            total_mass: config.dry_mass + config.prop_mass,
            dry_mass: config.dry_mass,
            reference_area: config.reference_area,
            propulsion,
            status,
            initial_prop_mass: config.prop_mass,
            name: config.name,
            role: config.role,
        })
    }

    /// Re-checks a stage restored from saved state against the
    /// construction rules and the propellant bounds.
    pub fn validate(&self) -> SimulationResult<()> {
        StageConfig::new(
            self.name.clone(),
            self.role,
            self.dry_mass,
            self.prop_mass(),
            self.propulsion.nominal_mass_flow(),
            self.propulsion.nominal_exhaust_velocity(),
            self.reference_area,
        )
        .validate()?;

        if !(self.total_mass.is_finite() && self.total_mass >= 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "stage '{}': total_mass must be a non-negative number, got {}",
                self.name, self.total_mass
            )));
        }
        if !(self.prop_mass() <= self.initial_prop_mass) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "stage '{}': prop_mass {} exceeds the loaded {}",
                self.name,
                self.prop_mass(),
                self.initial_prop_mass
            )));
        }
        Ok(())
    }

    /// Advances the stage by one tick. The step order matters: mass is
    /// depleted with the flow set on the previous tick, before the firing
    /// and attachment flags are applied.
    pub fn update(&mut self, delta_time: f64) {
        self.propulsion.deplete(delta_time);
        self.total_mass = (self.propulsion.prop_mass + self.dry_mass).max(0.0);

        self.propulsion.set_firing(self.is_firing());

        if !self.is_attached() {
            self.dry_mass = 0.0;
            self.reference_area = 0.0;
        }

        self.propulsion.calculate_thrust();
    }

    pub fn ignite(&mut self) {
        if self.status == StageStatus::Idle {
            self.status = StageStatus::Firing;
        }
    }

    pub fn shut_down(&mut self) {
        if self.status == StageStatus::Firing {
            self.status = StageStatus::Idle;
        }
    }

    /// Returns `true` only on the call that actually separates the stage.
    pub fn jettison(&mut self) -> bool {
        let separated = self.status != StageStatus::Jettisoned;
        self.status = StageStatus::Jettisoned;
        separated
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }

    pub fn is_firing(&self) -> bool {
        self.status == StageStatus::Firing
    }

    pub fn is_attached(&self) -> bool {
        self.status != StageStatus::Jettisoned
    }

    pub fn prop_mass(&self) -> f64 {
        self.propulsion.prop_mass
    }

    pub fn initial_prop_mass(&self) -> f64 {
        self.initial_prop_mass
    }

    pub fn thrust(&self) -> f64 {
        self.propulsion.thrust
    }

    pub fn is_depleted(&self) -> bool {
        self.propulsion.is_out_of_fuel()
    }
}
