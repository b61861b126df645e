use serde::{Deserialize, Serialize};

use crate::constants::{EARTH_MASS, EARTH_RADIUS, GRAVITATIONAL_CONSTANT};
use crate::errors::{SimulationError, SimulationResult};

/// Point-mass gravitational acceleration at `altitude` above the surface.
///
/// Negative: the acceleration points toward the centre of the body.
pub fn gravity_acceleration(body_mass: f64, body_radius: f64, altitude: f64) -> f64 {
    -(GRAVITATIONAL_CONSTANT * body_mass) / (body_radius + altitude).powi(2)
}

/// The body the vehicle launches from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CentralBody {
    pub mass: f64,   // kg
    pub radius: f64, // m
}

impl CentralBody {
    pub fn new(mass: f64, radius: f64) -> SimulationResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "central body mass must be positive, got {}",
                mass
            )));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimulationError::InvalidConfiguration(format!(
                "central body radius must be positive, got {}",
                radius
            )));
        }
        Ok(CentralBody { mass, radius })
    }

    pub fn earth() -> Self {
        CentralBody {
            mass: EARTH_MASS,
            radius: EARTH_RADIUS,
        }
    }

    pub fn gravity_at_altitude(&self, altitude: f64) -> f64 {
        gravity_acceleration(self.mass, self.radius, altitude)
    }
}

impl Default for CentralBody {
    fn default() -> Self {
        CentralBody::earth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_surface_gravity_of_earth() {
        let g = gravity_acceleration(EARTH_MASS, EARTH_RADIUS, 0.0);
        let expected = -GRAVITATIONAL_CONSTANT * EARTH_MASS / (EARTH_RADIUS * EARTH_RADIUS);
        assert_relative_eq!(g, expected, max_relative = 1e-15);
        assert_relative_eq!(g, -9.8196, epsilon = 1e-3);
    }

    #[test]
    fn test_gravity_weakens_with_altitude() {
        let earth = CentralBody::earth();
        let surface = earth.gravity_at_altitude(0.0);
        let high = earth.gravity_at_altitude(100_000.0);
        assert!(high < 0.0);
        assert!(high.abs() < surface.abs());

        let expected_ratio = (EARTH_RADIUS / (EARTH_RADIUS + 100_000.0)).powi(2);
        assert_relative_eq!(high / surface, expected_ratio, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_altitude_is_within_domain() {
        let g = gravity_acceleration(EARTH_MASS, EARTH_RADIUS, -1_000.0);
        assert!(g < gravity_acceleration(EARTH_MASS, EARTH_RADIUS, 0.0));
    }

    #[test]
    fn test_body_validation() {
        assert!(CentralBody::new(EARTH_MASS, EARTH_RADIUS).is_ok());
        assert!(matches!(
            CentralBody::new(0.0, EARTH_RADIUS),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            CentralBody::new(EARTH_MASS, -1.0),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        assert!(CentralBody::new(f64::NAN, EARTH_RADIUS).is_err());
    }
}
