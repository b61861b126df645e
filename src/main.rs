use clap::Parser;
use log::{error, info};
use std::fs;
use std::path::PathBuf;

use ascent_sim::telemetry_system::csv_export::write_csv_file;
use ascent_sim::*;

/// Simulates the ascent of a multi-stage rocket in fixed time steps.
#[derive(Parser, Debug)]
#[command(name = "ascent", version)]
struct Args {
    /// YAML vehicle configuration; SLS Block 1 when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time step in seconds, overriding the configuration
    #[arg(long)]
    dt: Option<f64>,

    /// Simulated duration in seconds, overriding the configuration
    #[arg(long)]
    duration: Option<f64>,

    /// Write the recorded time series to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Resume from a JSON state snapshot instead of a fresh vehicle
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Write the final vehicle state as a JSON snapshot
    #[arg(long)]
    state_out: Option<PathBuf>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => VehicleConfig::load(path)?,
        None => VehicleConfig::sls_block1(),
    };
    if let Some(dt) = args.dt {
        config.simulation.time_step = dt;
    }
    if let Some(duration) = args.duration {
        config.simulation.duration = duration;
    }
    config.simulation.validate()?;

    if args.print_config {
        print!("{}", config.to_yaml_string()?);
        return Ok(());
    }

    let mut vehicle = match &args.resume {
        Some(path) => Vehicle::from_json(&fs::read_to_string(path)?)?,
        None => Vehicle::from_config(&config)?,
    };
    let SimulationSettings {
        time_step,
        duration,
    } = config.simulation;
    let end_time = vehicle.time() + duration;

    info!(
        "Simulating {} stage(s) for {} s at dt = {} s",
        vehicle.stages().len(),
        duration,
        time_step
    );

    let mut telemetry = Telemetry::new(&vehicle);
    while vehicle.time() < end_time {
        let phase = vehicle.phase();
        match vehicle.update(time_step) {
            Ok(()) => {
                telemetry.collect_data(&vehicle);
                if vehicle.phase() != phase {
                    info!(
                        "Phase {} at t = {:.1} s, altitude {:.0} m",
                        vehicle.phase(),
                        vehicle.time(),
                        vehicle.altitude()
                    );
                }
            }
            Err(SimulationError::NoMass) => {
                error!("Vehicle has no mass left at t = {:.1} s, stopping", vehicle.time());
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &args.csv {
        write_csv_file(path, &telemetry)?;
        info!("Wrote {} rows to {}", telemetry.records.len(), path.display());
    }
    if let Some(path) = &args.state_out {
        fs::write(path, vehicle.to_json()?)?;
        info!("Wrote final state to {}", path.display());
    }
    if let Some(summary) = telemetry.summary() {
        println!("{}", summary);
    }

    Ok(())
}
