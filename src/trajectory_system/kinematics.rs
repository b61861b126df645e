use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{SimulationError, SimulationResult};
use crate::utils::vector2d::Vector2D;

/// Along-track motion state, integrated with a fixed-step explicit scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vector2D,
    pub velocity: f64,
    pub acceleration: f64,
    /// Degrees from horizontal.
    pub heading: f64,
    pub time: f64,
}

impl Kinematics {
    pub fn new(heading: f64) -> Self {
        Kinematics {
            position: Vector2D::default(),
            velocity: 0.0,
            acceleration: 0.0,
            heading,
            time: 0.0,
        }
    }

    pub fn get_altitude(&self) -> f64 {
        self.position.y
    }

    /// Applies `resultant_force` for one tick: acceleration, then velocity,
    /// then position. The displacement uses the velocity already updated
    /// this tick for both terms. On error the state is left untouched.
    pub fn update(
        &mut self,
        delta_time: f64,
        resultant_force: f64,
        total_mass: f64,
    ) -> SimulationResult<()> {
        if !(total_mass > 0.0) {
            return Err(SimulationError::NoMass);
        }

        let mut next = self.clone();
        next.acceleration = resultant_force / total_mass;
        next.velocity = next.velocity + next.acceleration * delta_time;
        next.position += next.displacement(delta_time);
        next.time += delta_time;

        if !(next.acceleration.is_finite()
            && next.velocity.is_finite()
            && next.position.is_finite())
        {
            return Err(SimulationError::NonFiniteState(format!(
                "t={} a={} v={} pos={:?}",
                next.time, next.acceleration, next.velocity, next.position
            )));
        }
        *self = next;
        Ok(())
    }

    fn displacement(&self, delta_time: f64) -> Vector2D {
        let theta = self.heading * PI / 180.0;
        let (sin, cos) = theta.sin_cos();
        let dt_squared = delta_time.powi(2);
        Vector2D::new(
            self.velocity * cos * delta_time + (0.5 * self.acceleration * cos) * dt_squared,
            self.velocity * sin * delta_time + (0.5 * self.acceleration * sin) * dt_squared,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_vertical_step_uses_updated_velocity() {
        let mut kinematics = Kinematics::new(90.0);
        kinematics.update(0.5, 200.0, 10.0).unwrap();

        assert_relative_eq!(kinematics.acceleration, 20.0, epsilon = EPSILON);
        assert_relative_eq!(kinematics.velocity, 10.0, epsilon = EPSILON);
        // 10 * 0.5 + 0.5 * 20 * 0.25
        assert_relative_eq!(kinematics.position.y, 7.5, epsilon = EPSILON);
        assert_abs_diff_eq!(kinematics.position.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(kinematics.time, 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_heading_splits_displacement() {
        let mut kinematics = Kinematics::new(30.0);
        kinematics.velocity = 100.0;
        kinematics.update(1.0, 0.0, 5.0).unwrap();

        assert_relative_eq!(kinematics.position.x, 100.0 * 3f64.sqrt() / 2.0, epsilon = 1e-9);
        assert_relative_eq!(kinematics.position.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_heading_past_vertical_moves_backwards() {
        let mut kinematics = Kinematics::new(150.0);
        kinematics.velocity = 10.0;
        kinematics.update(1.0, 0.0, 1.0).unwrap();
        assert!(kinematics.position.x < 0.0);
        assert!(kinematics.position.y > 0.0);
    }

    #[test]
    fn test_zero_mass_is_reported() {
        let mut kinematics = Kinematics::new(90.0);
        let before = kinematics.clone();
        assert!(matches!(
            kinematics.update(0.1, -10.0, 0.0),
            Err(SimulationError::NoMass)
        ));
        assert_eq!(kinematics, before);
    }

    #[test]
    fn test_non_finite_force_is_reported() {
        let mut kinematics = Kinematics::new(90.0);
        kinematics.update(0.1, 20.0, 1.0).unwrap();
        let before = kinematics.clone();
        assert!(matches!(
            kinematics.update(0.1, f64::INFINITY, 1.0),
            Err(SimulationError::NonFiniteState(_))
        ));
        assert_eq!(kinematics, before);
    }
}
