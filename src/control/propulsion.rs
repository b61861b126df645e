use serde::{Deserialize, Serialize};

/// Propellant and engine bookkeeping for one stage.
///
/// Mass flow and exhaust velocity are negative by convention, so their
/// product is a positive thrust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropulsionSystem {
    pub prop_mass: f64,
    pub mass_flow: f64,
    pub exhaust_velocity: f64,
    pub thrust: f64,
    nominal_mass_flow: f64,
    nominal_exhaust_velocity: f64,
}

impl PropulsionSystem {
    pub fn new(prop_mass: f64, mass_flow: f64, exhaust_velocity: f64) -> Self {
        PropulsionSystem {
            prop_mass,
            mass_flow,
            exhaust_velocity,
            thrust: 0.0,
            nominal_mass_flow: mass_flow,
            nominal_exhaust_velocity: exhaust_velocity,
        }
    }

    /// Burns propellant at the current mass flow, never below empty.
    pub fn deplete(&mut self, delta_time: f64) {
        self.prop_mass = (self.prop_mass + self.mass_flow * delta_time).max(0.0);
    }

    /// Restores the nominal engine settings while firing, zeroes them otherwise.
    pub fn set_firing(&mut self, firing: bool) {
        if firing {
            self.mass_flow = self.nominal_mass_flow;
            self.exhaust_velocity = self.nominal_exhaust_velocity;
        } else {
            self.mass_flow = 0.0;
            self.exhaust_velocity = 0.0;
        }
    }

    pub fn calculate_thrust(&mut self) {
        self.thrust = if self.prop_mass > 0.0 {
            self.exhaust_velocity * self.mass_flow
        } else {
            0.0
        };
    }

    pub fn nominal_mass_flow(&self) -> f64 {
        self.nominal_mass_flow
    }

    pub fn nominal_exhaust_velocity(&self) -> f64 {
        self.nominal_exhaust_velocity
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.prop_mass <= 0.0
    }
}
