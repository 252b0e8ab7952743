//! Numerical engine and simulation facade.
//!
//! This module holds the one iterative method in the crate, the extinction
//! angle solve, and the [`Simulator`] that chains the pipeline:
//!
//! ```text
//! CircuitConfiguration -> ConductionModel -> Waveform -> PerformanceMetrics
//! ```
//!
//! ## Extinction angle
//!
//! A thyristor (or diode) feeding an R-L load keeps conducting after the
//! supply voltage reverses, until the load current decays to zero. Starting
//! from zero current at source angle α, the current is
//!
//! ```text
//! i(θ) = (Vm/Z) [ sin(θ - φ) - sin(α - φ) e^{-(θ-α)/tan φ} ]
//! ```
//!
//! and the extinction angle β is the first root of `i(β) = 0` after α,
//! found by [`ExtinctionSolver`].

mod newton;
mod simulator;

pub use newton::{solve_extinction_angle, ExtinctionSolver};
pub use simulator::{SimulationResult, Simulator, SimulatorConfig};

/// Convergence tolerance of the extinction angle, in radians.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Maximum Newton-Raphson iterations for one extinction angle.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Highest harmonic (multiple of the supply frequency) included in THD.
pub const DEFAULT_MAX_HARMONICS: usize = 50;

/// Step of the forward scan that brackets the extinction angle (1°).
pub const SCAN_STEP: f64 = std::f64::consts::PI / 180.0;

/// Conduction widths below this (radians) count as no conduction.
pub const MIN_CONDUCTION_WIDTH: f64 = 1e-12;
