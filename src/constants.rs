// Physical Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6738e-11; // N⋅m²/kg²
pub const EARTH_MASS: f64 = 5.9722e24; // kg
pub const EARTH_RADIUS: f64 = 6.371e6; // m

// Aerodynamic Constants
pub const SPEED_OF_SOUND: f64 = 343.0; // m/s, fixed for every altitude
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³

// Simulation Parameters
pub const TIME_STEP: f64 = 0.1; // s
pub const SIMULATION_DURATION: f64 = 1000.0; // s

// Pitch program (degrees from horizontal)
pub const INITIAL_HEADING: f64 = 90.0;
pub const CORE_PHASE_HEADING: f64 = 150.0;
pub const INTERIM_PHASE_HEADING: f64 = 30.0;

/// Stage parameters as `(dry mass kg, propellant kg, mass flow kg/s, exhaust velocity m/s, reference area m²)`.
///
/// Values are the SLS Block 1 / 1B figures from http://www.braeunig.us/space/specs/sls.htm.
/// Mass flow and exhaust velocity are negative by convention.
pub type StageParameters = (f64, f64, f64, f64, f64);

pub const CORE_STAGE: StageParameters = (85_300.0, 987_500.0, -2_060.0, -4_292.0, 77.04);
pub const SOLID_ROCKET_BOOSTERS: StageParameters =
    (200_780.0, 1_262_990.0, -10_023.73, -3_192.42, 10.81);
pub const INTERIM_CRYOGENIC_STAGE: StageParameters = (5_000.0, 28_987.0, -25.77, -4_272.41, 20.43);
pub const EXPLORATION_UPPER_STAGE: StageParameters = (14_110.0, 129_000.0, -180.0, -2_406.0, 10.1);
