//! Main simulator interface.

use log::info;

use crate::circuit::CircuitConfiguration;
use crate::conduction::ConductionModel;
use crate::error::Result;
use crate::metrics::{IntegrationMethod, MetricsCalculator, PerformanceMetrics};
use crate::waveform::{Waveform, WaveformGenerator};

use super::{ExtinctionSolver, DEFAULT_MAX_HARMONICS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

/// Numerical settings of the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Maximum Newton-Raphson iterations for the extinction angle.
    pub max_iterations: usize,
    /// Convergence tolerance of the extinction angle (radians).
    pub tolerance: f64,
    /// Highest supply harmonic included in THD.
    pub max_harmonics: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            max_harmonics: DEFAULT_MAX_HARMONICS,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum Newton-Raphson iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the extinction angle tolerance (in radians).
    ///
    /// - 1e-9 (default): well below any sampling resolution
    /// - 1e-6: ample for plotting
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the highest harmonic included in THD.
    pub fn with_max_harmonics(mut self, max_harmonics: usize) -> Self {
        self.max_harmonics = max_harmonics;
        self
    }
}

/// Everything one computation hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Conduction intervals of one period
    pub conduction: ConductionModel,
    /// Sampled output and supply
    pub waveform: Waveform,
    /// Scalar figures of merit
    pub metrics: PerformanceMetrics,
}

impl SimulationResult {
    /// How the averages and RMS values were obtained.
    pub fn method(&self) -> IntegrationMethod {
        self.metrics.method
    }

    /// Whether the metrics come from analytic integrals.
    pub fn is_closed_form(&self) -> bool {
        self.metrics.method == IntegrationMethod::ClosedForm
    }
}

/// The rectifier simulator.
///
/// Holds only numerical settings; every [`Simulator::run`] is an independent,
/// deterministic computation.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    solver: ExtinctionSolver,
    generator: WaveformGenerator,
    metrics: MetricsCalculator,
}

impl Simulator {
    /// Create a simulator with default settings.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Create a simulator with custom settings.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            solver: ExtinctionSolver::with_config(config.max_iterations, config.tolerance),
            generator: WaveformGenerator::new(),
            metrics: MetricsCalculator::new().with_max_harmonics(config.max_harmonics),
        }
    }

    /// Analyse a configuration, sample its waveform and derive its metrics.
    pub fn run(&self, circuit: &CircuitConfiguration) -> Result<SimulationResult> {
        let conduction = ConductionModel::analyze_with(circuit, &self.solver)?;
        let waveform = self.generator.generate(circuit, &conduction);
        let metrics = self.metrics.compute(circuit, &conduction, &waveform)?;

        info!(
            "{}: Vdc = {:.3} V, Vrms = {:.3} V ({})",
            circuit.topology, metrics.average_voltage, metrics.rms_voltage, metrics.method
        );

        Ok(SimulationResult {
            conduction,
            waveform,
            metrics,
        })
    }
}
