//! Air density by altitude.
//!
//! Piecewise-constant approximation of the 1976 U.S. Standard Atmosphere
//! (https://www.engineeringtoolbox.com/standard-atmosphere-d_604.html).
//! The band values are regression data: keep them exactly as listed.

use crate::constants::AIR_DENSITY_SEA_LEVEL;
use crate::utils::bands::BandTable;

/// Altitude above which the atmosphere is treated as vacuum.
pub const ATMOSPHERE_CEILING: f64 = 80_000.0; // m

const DENSITY_BANDS: [(f64, f64); 19] = [
    (1_000.0, 1.112),
    (2_000.0, 1.007),
    (3_000.0, 0.9093),
    (4_000.0, 0.8194),
    (5_000.0, 0.7364),
    (6_000.0, 0.661),
    (7_000.0, 0.5900),
    (8_000.0, 0.5258),
    (9_000.0, 0.4671),
    (10_000.0, 0.4135),
    (15_000.0, 0.1948),
    (20_000.0, 0.08891),
    (25_000.0, 0.04008),
    (30_000.0, 0.01841),
    (40_000.0, 0.003996),
    (50_000.0, 0.001027),
    (60_000.0, 0.0003097),
    (70_000.0, 0.00008283),
    (ATMOSPHERE_CEILING, 0.00001846),
];

pub const DENSITY_TABLE: BandTable =
    BandTable::new(0.0, AIR_DENSITY_SEA_LEVEL, &DENSITY_BANDS, 0.0);

/// Air density in kg/m³ at `altitude` metres.
pub fn density(altitude: f64) -> f64 {
    DENSITY_TABLE.lookup(altitude)
}
