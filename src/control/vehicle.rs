use log::trace;
use serde::{Deserialize, Serialize};

use super::{
    environment,
    guidance::{FlightController, FlightPhase, PitchProgram},
    launch_stages::{Stage, StageConfig, StageRole},
    payload::Payload,
    structure::Structure,
};
use crate::config::VehicleConfig;
use crate::constants::AIR_DENSITY_SEA_LEVEL;
use crate::errors::{SimulationError, SimulationResult};
use crate::trajectory_system::{
    aerodynamics::Aerodynamics, gravity::CentralBody, kinematics::Kinematics,
};
use crate::utils::vector2d::Vector2D;

/// The simulated rocket. `update` is the only mutator; every derived
/// quantity is recomputed from stage state on access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    structure: Structure,
    controller: FlightController,
    kinematics: Kinematics,
    aerodynamics: Aerodynamics,
    air_density: f64,
    reference_area: f64,
    body: CentralBody,
}

impl Vehicle {
    /// Vehicle with no payload and the default pitch program.
    pub fn new(stages: Vec<StageConfig>, body: CentralBody) -> SimulationResult<Self> {
        Self::from_config(&VehicleConfig {
            body,
            stages,
            ..VehicleConfig::default()
        })
    }

    pub fn from_config(config: &VehicleConfig) -> SimulationResult<Self> {
        let body = CentralBody::new(config.body.mass, config.body.radius)?;
        config.pitch_program.validate()?;
        let stages = config
            .stages
            .iter()
            .cloned()
            .map(Stage::new)
            .collect::<SimulationResult<Vec<_>>>()?;
        let structure = Structure::new(stages, Payload::new(config.payload_mass)?)?;

        Ok(Vehicle {
            structure,
            controller: FlightController::new(config.pitch_program),
            kinematics: Kinematics::new(config.pitch_program.initial),
            aerodynamics: Aerodynamics::default(),
            air_density: AIR_DENSITY_SEA_LEVEL,
            reference_area: 0.0,
            body,
        })
    }

    /// Advances the simulation by `delta_time` seconds. On error the
    /// vehicle is left exactly as it was before the call.
    pub fn update(&mut self, delta_time: f64) -> SimulationResult<()> {
        if !(delta_time.is_finite() && delta_time >= 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "time step must be a non-negative number, got {}",
                delta_time
            )));
        }

        let mut next = self.clone();
        next.step(delta_time)?;
        *self = next;
        Ok(())
    }

    /// Order matters: staging, stage depletion, density, reference area,
    /// drag from the previous tick's velocity, then integration.
    fn step(&mut self, delta_time: f64) -> SimulationResult<()> {
        self.controller
            .update(&mut self.structure, &mut self.kinematics.heading);
        self.structure.update(delta_time);

        self.air_density = environment::density(self.kinematics.get_altitude());
        self.reference_area = self.select_reference_area();
        self.aerodynamics =
            Aerodynamics::evaluate(self.kinematics.velocity, self.air_density, self.reference_area);

        let resultant_force = self.resultant_force();
        let total_mass = self.total_mass();
        self.kinematics
            .update(delta_time, resultant_force, total_mass)?;

        trace!(
            "t={:.3} phase={} alt={:.3} v={:.3} a={:.3} m={:.3}",
            self.kinematics.time,
            self.phase(),
            self.altitude(),
            self.velocity(),
            self.acceleration(),
            total_mass
        );
        Ok(())
    }

    fn select_reference_area(&self) -> f64 {
        match self.controller.phase() {
            FlightPhase::CoreSrb => self.structure.reference_area_of(StageRole::Core),
            FlightPhase::Core => {
                self.structure.reference_area_of(StageRole::Core)
                    - self.structure.reference_area_of(StageRole::Booster)
            }
            FlightPhase::Interim => self.structure.reference_area_of(StageRole::Interim),
        }
    }

    pub fn total_dry_mass(&self) -> f64 {
        self.structure.get_total_dry_mass()
    }

    pub fn total_propellant_mass(&self) -> f64 {
        self.structure.get_total_fuel()
    }

    pub fn total_mass(&self) -> f64 {
        self.structure.get_total_mass()
    }

    /// Signed gravitational acceleration at the current altitude (negative = down).
    pub fn gravity_acceleration(&self) -> f64 {
        self.body.gravity_at_altitude(self.altitude())
    }

    /// Magnitude of the gravitational acceleration, as recorded in telemetry.
    pub fn gravity(&self) -> f64 {
        -self.gravity_acceleration()
    }

    pub fn weight(&self) -> f64 {
        self.total_mass() * self.gravity_acceleration()
    }

    pub fn thrust(&self) -> f64 {
        self.structure.get_thrust()
    }

    pub fn resultant_force(&self) -> f64 {
        self.thrust() + self.weight() + self.drag_force()
    }

    pub fn drag_force(&self) -> f64 {
        self.aerodynamics.drag_force
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.aerodynamics.drag_coefficient
    }

    pub fn mach(&self) -> f64 {
        self.aerodynamics.mach
    }

    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    pub fn reference_area(&self) -> f64 {
        self.reference_area
    }

    pub fn velocity(&self) -> f64 {
        self.kinematics.velocity
    }

    pub fn acceleration(&self) -> f64 {
        self.kinematics.acceleration
    }

    pub fn position(&self) -> Vector2D {
        self.kinematics.position
    }

    pub fn altitude(&self) -> f64 {
        self.kinematics.get_altitude()
    }

    pub fn heading(&self) -> f64 {
        self.kinematics.heading
    }

    /// Simulated seconds elapsed, summed over every `update` call.
    pub fn time(&self) -> f64 {
        self.kinematics.time
    }

    pub fn phase(&self) -> FlightPhase {
        self.controller.phase()
    }

    pub fn pitch_program(&self) -> &PitchProgram {
        self.controller.pitch_program()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.structure.stages
    }

    pub fn stage(&self, role: StageRole) -> Option<&Stage> {
        self.structure.stage(role)
    }

    pub fn payload_mass(&self) -> f64 {
        self.structure.payload.get_mass()
    }

    pub fn body(&self) -> &CentralBody {
        &self.body
    }

    /// Full engine state, suitable for resuming a run later.
    pub fn to_json(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a snapshot written by `to_json`, applying the same checks
    /// as construction from a configuration.
    pub fn from_json(snapshot: &str) -> SimulationResult<Self> {
        let vehicle: Vehicle = serde_json::from_str(snapshot)?;
        vehicle.validate()?;
        Ok(vehicle)
    }

    fn validate(&self) -> SimulationResult<()> {
        CentralBody::new(self.body.mass, self.body.radius)?;
        Payload::new(self.payload_mass())?;
        self.pitch_program().validate()?;
        for stage in &self.structure.stages {
            stage.validate()?;
        }
        self.structure.validate()
    }
}
