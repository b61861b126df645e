use serde::{Deserialize, Serialize};
use std::fmt;

use crate::control::{guidance::FlightPhase, vehicle::Vehicle};

/// Fixed leading columns; one propellant column per stage follows.
pub const BASE_COLUMNS: [&str; 15] = [
    "Time",
    "Altitude",
    "X Position",
    "Velocity",
    "Acceleration",
    "Thrust",
    "Drag Force",
    "Weight",
    "Gravity Acceleration",
    "Resultant Force",
    "Mach Speed",
    "Air Density",
    "Reference Area",
    "Current Total Mass",
    "Total Fuel Remaining",
];

/// Read-only snapshot of the engine after one `update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub time: f64,
    pub altitude: f64,
    pub x_position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub thrust: f64,
    pub drag_force: f64,
    pub weight: f64,
    pub gravity_acceleration: f64,
    pub resultant_force: f64,
    pub mach: f64,
    pub air_density: f64,
    pub reference_area: f64,
    pub total_mass: f64,
    pub total_fuel: f64,
    pub stage_fuel: Vec<f64>,
    pub phase: FlightPhase,
}

impl TelemetryRecord {
    pub fn capture(time: f64, vehicle: &Vehicle) -> Self {
        let position = vehicle.position();
        TelemetryRecord {
            time,
            altitude: position.y,
            x_position: position.x,
            velocity: vehicle.velocity(),
            acceleration: vehicle.acceleration(),
            thrust: vehicle.thrust(),
            drag_force: vehicle.drag_force(),
            weight: vehicle.weight(),
            gravity_acceleration: vehicle.gravity(),
            resultant_force: vehicle.resultant_force(),
            mach: vehicle.mach(),
            air_density: vehicle.air_density(),
            reference_area: vehicle.reference_area(),
            total_mass: vehicle.total_mass(),
            total_fuel: vehicle.total_propellant_mass(),
            stage_fuel: vehicle.stages().iter().map(|stage| stage.prop_mass()).collect(),
            phase: vehicle.phase(),
        }
    }

    /// Column values in header order.
    pub fn values(&self) -> Vec<f64> {
        let mut values = vec![
            self.time,
            self.altitude,
            self.x_position,
            self.velocity,
            self.acceleration,
            self.thrust,
            self.drag_force,
            self.weight,
            self.gravity_acceleration,
            self.resultant_force,
            self.mach,
            self.air_density,
            self.reference_area,
            self.total_mass,
            self.total_fuel,
        ];
        values.extend_from_slice(&self.stage_fuel);
        values
    }
}

/// Column names for a vehicle: the base columns, then one per stage.
pub fn column_names(vehicle: &Vehicle) -> Vec<String> {
    BASE_COLUMNS
        .iter()
        .map(|column| column.to_string())
        .chain(
            vehicle
                .stages()
                .iter()
                .map(|stage| format!("{} Fuel Remaining", stage.name)),
        )
        .collect()
}

pub struct Telemetry {
    pub columns: Vec<String>,
    pub records: Vec<TelemetryRecord>,
    max_velocity: f64,
    max_altitude: f64,
    max_acceleration: f64,
    phase_times: Vec<(FlightPhase, f64)>,
}

impl Telemetry {
    pub fn new(vehicle: &Vehicle) -> Self {
        Telemetry {
            columns: column_names(vehicle),
            records: Vec::new(),
            max_velocity: f64::NEG_INFINITY,
            max_altitude: f64::NEG_INFINITY,
            max_acceleration: f64::NEG_INFINITY,
            phase_times: Vec::new(),
        }
    }

    pub fn collect_data(&mut self, vehicle: &Vehicle) -> &TelemetryRecord {
        let record = TelemetryRecord::capture(vehicle.time(), vehicle);

        self.max_velocity = self.max_velocity.max(record.velocity);
        self.max_altitude = self.max_altitude.max(record.altitude);
        self.max_acceleration = self.max_acceleration.max(record.acceleration);

        let phase_changed = self
            .phase_times
            .last()
            .map_or(true, |(phase, _)| *phase != record.phase);
        if phase_changed {
            self.phase_times.push((record.phase, record.time));
        }

        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn phase_times(&self) -> &[(FlightPhase, f64)] {
        &self.phase_times
    }

    pub fn summary(&self) -> Option<TelemetrySummary> {
        let last = self.records.last()?;
        Some(TelemetrySummary {
            samples: self.records.len(),
            duration: last.time,
            max_velocity: self.max_velocity,
            max_altitude: self.max_altitude,
            max_acceleration: self.max_acceleration,
            final_mass: last.total_mass,
            final_fuel: last.total_fuel,
            phase_times: self.phase_times.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySummary {
    pub samples: usize,
    pub duration: f64,
    pub max_velocity: f64,
    pub max_altitude: f64,
    pub max_acceleration: f64,
    pub final_mass: f64,
    pub final_fuel: f64,
    pub phase_times: Vec<(FlightPhase, f64)>,
}

fn format_time(elapsed_time: f64) -> String {
    if elapsed_time >= 60.0 {
        let minutes = (elapsed_time / 60.0).floor();
        let seconds = elapsed_time % 60.0;
        format!("{:.0}m {:.2}s", minutes, seconds)
    } else {
        format!("{:.2}s", elapsed_time)
    }
}

fn format_altitude(altitude: f64) -> String {
    if altitude.abs() >= 1000.0 {
        format!("{:.2} km", altitude / 1000.0)
    } else {
        format!("{:.2} m", altitude)
    }
}

impl fmt::Display for TelemetrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Simulation Summary ---")?;
        writeln!(f, "Samples: {} over {}", self.samples, format_time(self.duration))?;
        writeln!(f, "Max Velocity: {:.2} m/s", self.max_velocity)?;
        writeln!(f, "Max Altitude: {}", format_altitude(self.max_altitude))?;
        writeln!(f, "Max Acceleration: {:.2} m/s²", self.max_acceleration)?;
        writeln!(f, "Final Mass: {:.2} kg", self.final_mass)?;
        writeln!(f, "Fuel Remaining: {:.2} kg", self.final_fuel)?;
        for (phase, time) in &self.phase_times {
            writeln!(f, "Phase {} reached at: {}", phase, format_time(*time))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VehicleConfig;

    fn sls() -> Vehicle {
        Vehicle::from_config(&VehicleConfig::sls_block1()).unwrap()
    }

    #[test]
    fn test_columns_follow_stage_order() {
        let columns = column_names(&sls());
        assert_eq!(columns.len(), BASE_COLUMNS.len() + 3);
        assert_eq!(columns[0], "Time");
        assert_eq!(columns[14], "Total Fuel Remaining");
        assert_eq!(columns[15], "Core Fuel Remaining");
        assert_eq!(columns[16], "SRB Fuel Remaining");
        assert_eq!(columns[17], "Interim Fuel Remaining");
    }

    #[test]
    fn test_record_matches_vehicle_state() {
        let mut vehicle = sls();
        vehicle.update(0.1).unwrap();
        let record = TelemetryRecord::capture(vehicle.time(), &vehicle);

        assert_eq!(record.altitude, vehicle.altitude());
        assert_eq!(record.thrust, vehicle.thrust());
        assert_eq!(record.gravity_acceleration, -vehicle.gravity_acceleration());
        assert!(record.gravity_acceleration > 0.0);
        assert_eq!(record.stage_fuel.len(), 3);
        assert_eq!(record.values().len(), column_names(&vehicle).len());
        assert_eq!(record.values()[13], vehicle.total_mass());
    }

    #[test]
    fn test_collect_tracks_extremes_and_phases() {
        let mut vehicle = sls();
        let mut telemetry = Telemetry::new(&vehicle);
        for _ in 0..20 {
            vehicle.update(0.1).unwrap();
            telemetry.collect_data(&vehicle);
        }

        assert_eq!(telemetry.records.len(), 20);
        assert_eq!(telemetry.phase_times().len(), 1);
        assert_eq!(telemetry.phase_times()[0].0, FlightPhase::CoreSrb);

        let summary = telemetry.summary().unwrap();
        assert_eq!(summary.samples, 20);
        assert_eq!(summary.max_altitude, vehicle.altitude());
        assert!(summary.to_string().contains("Phase Core SRB reached at"));
    }

    #[test]
    fn test_empty_telemetry_has_no_summary() {
        assert!(Telemetry::new(&sls()).summary().is_none());
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(format_time(12.5), "12.50s");
        assert_eq!(format_time(125.0), "2m 5.00s");
        assert_eq!(format_altitude(512.0), "512.00 m");
        assert_eq!(format_altitude(12_500.0), "12.50 km");
    }
}
