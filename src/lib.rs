//! # Rectifier Core
//!
//! Waveform and performance-metric engine for the six rectifier topologies
//! of an introductory power-electronics course.
//!
//! This library provides:
//! - Conduction-interval analysis for diode and thyristor rectifiers
//! - Sampled output voltage and load current for R and R-L loads
//! - Average, RMS, form/ripple factor, efficiency, THD and PIV figures
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Topology, configuration and validation
//! - [`conduction`] - Which source drives the output, and when
//! - [`waveform`] - Instantaneous voltage and current samples
//! - [`metrics`] - Scalar metrics and harmonic analysis
//! - [`solver`] - Extinction-angle solve and the [`Simulator`] facade
//! - [`output`] - CSV and table output (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! rectifier --topology half-wave-controlled --amplitude 325 --firing-angle 45 --resistance 10
//! rectifier --topology three-phase-uncontrolled --amplitude 325 --resistance 10 --csv > out.csv
//! ```
//!
//! ### Library
//!
//! ```
//! use rectifier_core::{CircuitConfiguration, Simulator, Topology};
//!
//! let config = CircuitConfiguration::new(Topology::HalfWaveUncontrolled, 100.0, 50.0, 10.0);
//! let result = Simulator::new().run(&config).unwrap();
//! assert!((result.metrics.average_voltage - 100.0 / std::f64::consts::PI).abs() < 1e-9);
//! ```
//!
//! ## Method
//!
//! Switches are ideal and the circuit is in periodic steady state. Within a
//! conduction interval the output follows a sinusoid, and the current of an
//! R-L load follows the forced-plus-natural response of a first-order
//! circuit. The only iterative step is the extinction angle of a decaying
//! inductive current, solved by a bracketed Newton-Raphson iteration.

pub mod circuit;
pub mod conduction;
pub mod error;
pub mod metrics;
pub mod solver;
pub mod waveform;

#[cfg(feature = "cli")]
pub mod output;

// Re-export main types for convenience
pub use circuit::{CircuitConfiguration, Topology};
pub use conduction::{ConductionInterval, ConductionMode, ConductionModel};
pub use error::{RectifierError, Result};
pub use metrics::{IntegrationMethod, MetricsCalculator, PerformanceMetrics};
pub use solver::{solve_extinction_angle, SimulationResult, Simulator, SimulatorConfig};
pub use waveform::{Waveform, WaveformGenerator, WaveformSample};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmRectifierSim;

/// Default number of supply periods to sample
pub const DEFAULT_CYCLES: usize = 2;

/// Default samples per supply period
pub const DEFAULT_SAMPLES_PER_CYCLE: usize = 1000;

/// Default supply frequency in Hz
pub const DEFAULT_FREQUENCY: f64 = 50.0;

/// Run the full pipeline with default numerical settings.
pub fn simulate(config: &CircuitConfiguration) -> Result<SimulationResult> {
    Simulator::new().run(config)
}
