//! Rectifier - waveform and metrics calculator
//!
//! Computes the steady-state output of a single- or three-phase rectifier.
//!
//! # Usage
//!
//! ```bash
//! rectifier --topology full-wave-controlled --amplitude 325 --firing-angle 60 --resistance 10 --inductance 0.05
//! rectifier --topology half-wave-uncontrolled --amplitude 100 --resistance 10 --csv | gnuplot ...
//! ```

use std::io;

use clap::Parser;
use log::debug;
use rectifier_core::{
    error::Result,
    output::{write_csv, write_metrics},
    CircuitConfiguration, Simulator, SimulatorConfig, Topology, DEFAULT_CYCLES, DEFAULT_FREQUENCY,
    DEFAULT_SAMPLES_PER_CYCLE,
};

/// Rectifier waveform and performance calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rectifier topology (e.g. half-wave-controlled, three-phase-uncontrolled)
    #[arg(short, long)]
    topology: Topology,

    /// Peak supply voltage in volts (phase peak for three-phase)
    #[arg(short, long)]
    amplitude: f64,

    /// Supply frequency in Hz
    #[arg(short, long, default_value_t = DEFAULT_FREQUENCY)]
    frequency: f64,

    /// Firing angle in degrees (controlled topologies only)
    #[arg(short = 'x', long)]
    firing_angle: Option<f64>,

    /// Load resistance in ohms
    #[arg(short, long)]
    resistance: f64,

    /// Load inductance in henries
    #[arg(short = 'l', long, default_value_t = 0.0)]
    inductance: f64,

    /// Number of supply periods to sample
    #[arg(short, long, default_value_t = DEFAULT_CYCLES)]
    cycles: usize,

    /// Samples per supply period
    #[arg(short, long, default_value_t = DEFAULT_SAMPLES_PER_CYCLE)]
    samples_per_cycle: usize,

    /// Maximum Newton-Raphson iterations for the extinction angle
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Extinction angle tolerance in radians
    #[arg(long)]
    tolerance: Option<f64>,

    /// Write the sample sequence as CSV instead of the metrics table
    #[arg(long)]
    csv: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    debug!("{:?}", args);

    let mut circuit = CircuitConfiguration::new(
        args.topology,
        args.amplitude,
        args.frequency,
        args.resistance,
    )
    .with_inductance(args.inductance)
    .with_cycles(args.cycles)
    .with_samples_per_cycle(args.samples_per_cycle);
    circuit.firing_angle_degrees = args.firing_angle;

    let mut config = SimulatorConfig::new();
    if let Some(max_iterations) = args.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }
    if let Some(tolerance) = args.tolerance {
        config = config.with_tolerance(tolerance);
    }

    let result = Simulator::with_config(config).run(&circuit)?;

    let stdout = io::stdout();
    if args.csv {
        write_csv(&result.waveform, stdout.lock())?;
    } else {
        write_metrics(&result, stdout.lock())?;
    }

    Ok(())
}
