use serde::{Deserialize, Serialize};

use crate::constants::SPEED_OF_SOUND;
use crate::utils::bands::BandTable;

// Loosely follows the Artemis I / SLS drag curve:
// https://www.researchgate.net/publication/362270344
const DRAG_COEFFICIENT_BANDS: [(f64, f64); 13] = [
    (1.00, 0.25),
    (1.25, 0.60),
    (1.50, 0.65),
    (2.00, 0.55),
    (2.25, 0.50),
    (2.50, 0.45),
    (2.75, 0.43),
    (3.00, 0.40),
    (3.50, 0.33),
    (4.00, 0.30),
    (5.00, 0.28),
    (6.00, 0.26),
    (8.00, 0.25),
];

pub const DRAG_COEFFICIENT_TABLE: BandTable =
    BandTable::new(0.25, 0.25, &DRAG_COEFFICIENT_BANDS, 0.23);

/// Mach number against a fixed speed of sound.
pub fn mach(velocity: f64) -> f64 {
    velocity / SPEED_OF_SOUND
}

pub fn coefficient(mach: f64) -> f64 {
    DRAG_COEFFICIENT_TABLE.lookup(mach)
}

/// Drag force in newtons.
///
/// Negated only while the vehicle moves up; for `velocity <= 0` the force
/// stays positive.
pub fn drag_force(velocity: f64, density: f64, coefficient: f64, reference_area: f64) -> f64 {
    let magnitude = 0.5 * density * velocity.powi(2) * coefficient * reference_area;
    if velocity > 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Aerodynamic quantities computed once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aerodynamics {
    pub mach: f64,
    pub drag_coefficient: f64,
    pub drag_force: f64,
}

impl Aerodynamics {
    pub fn evaluate(velocity: f64, density: f64, reference_area: f64) -> Self {
        let mach = mach(velocity);
        let drag_coefficient = coefficient(mach);
        Aerodynamics {
            mach,
            drag_coefficient,
            drag_force: drag_force(velocity, density, drag_coefficient, reference_area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_subsonic_coefficient() {
        assert_eq!(coefficient(-3.0), 0.25);
        assert_eq!(coefficient(0.0), 0.25);
        assert_eq!(coefficient(0.25), 0.25);
        assert_eq!(coefficient(0.9), 0.25);
        assert_eq!(coefficient(1.0), 0.25);
    }

    #[test]
    fn test_transonic_peak() {
        assert_eq!(coefficient(1.0001), 0.60);
        assert_eq!(coefficient(1.25), 0.60);
        assert_eq!(coefficient(1.4), 0.65);
        assert_eq!(coefficient(1.75), 0.55);
    }

    #[test]
    fn test_supersonic_bands() {
        assert_eq!(coefficient(2.1), 0.50);
        assert_eq!(coefficient(2.5), 0.45);
        assert_eq!(coefficient(2.6), 0.43);
        assert_eq!(coefficient(3.0), 0.40);
        assert_eq!(coefficient(3.2), 0.33);
        assert_eq!(coefficient(4.0), 0.30);
        assert_eq!(coefficient(4.5), 0.28);
        assert_eq!(coefficient(5.5), 0.26);
        assert_eq!(coefficient(8.0), 0.25);
    }

    #[test]
    fn test_hypersonic_coefficient() {
        assert_eq!(coefficient(8.0001), 0.23);
        assert_eq!(coefficient(25.0), 0.23);
    }

    #[test]
    fn test_coefficient_has_no_hysteresis() {
        let sweep_up: Vec<f64> = (0..200).map(|i| coefficient(i as f64 * 0.05)).collect();
        let sweep_down: Vec<f64> = (0..200)
            .rev()
            .map(|i| coefficient(i as f64 * 0.05))
            .collect();
        let reversed: Vec<f64> = sweep_down.into_iter().rev().collect();
        assert_eq!(sweep_up, reversed);
    }

    #[test]
    fn test_mach_uses_fixed_speed_of_sound() {
        assert_relative_eq!(mach(343.0), 1.0, epsilon = EPSILON);
        assert_relative_eq!(mach(686.0), 2.0, epsilon = EPSILON);
        assert_relative_eq!(mach(-171.5), -0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_drag_opposes_ascent() {
        let force = drag_force(100.0, 1.225, 0.25, 10.0);
        assert_relative_eq!(force, -15_312.5, epsilon = EPSILON);
    }

    #[test]
    fn test_drag_stays_positive_when_descending() {
        let up = drag_force(100.0, 1.225, 0.25, 10.0);
        let down = drag_force(-100.0, 1.225, 0.25, 10.0);
        assert_relative_eq!(down, 15_312.5, epsilon = EPSILON);
        assert_relative_eq!(down, -up, epsilon = EPSILON);
        assert_eq!(drag_force(0.0, 1.225, 0.25, 10.0), 0.0);
    }

    #[test]
    fn test_drag_vanishes_in_vacuum() {
        assert_eq!(drag_force(3_000.0, 0.0, 0.23, 77.04), 0.0);
    }

    #[test]
    fn test_evaluate_chains_mach_coefficient_and_force() {
        let aero = Aerodynamics::evaluate(450.0, 0.4135, 77.04);
        assert_relative_eq!(aero.mach, 450.0 / 343.0, epsilon = EPSILON);
        assert_eq!(aero.drag_coefficient, 0.65);
        let expected = -(0.5 * 0.4135 * 450.0_f64.powi(2) * 0.65 * 77.04);
        assert_relative_eq!(aero.drag_force, expected, epsilon = 1e-6);
    }
}
