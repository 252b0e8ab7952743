//! Circuit configuration: supply, load, topology and control parameters.

use std::f64::consts::PI;

use super::types::Topology;
use super::validate::validate_configuration;
use crate::error::Result;
use crate::{DEFAULT_CYCLES, DEFAULT_SAMPLES_PER_CYCLE};

/// A complete rectifier description, ready for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitConfiguration {
    /// Rectifier topology
    pub topology: Topology,

    /// Peak supply voltage Vm in volts (phase peak for three-phase supplies)
    pub supply_amplitude: f64,

    /// Supply frequency in Hz
    pub supply_frequency: f64,

    /// Firing angle in degrees; `None` for uncontrolled topologies
    pub firing_angle_degrees: Option<f64>,

    /// Load resistance in ohms
    pub load_resistance: f64,

    /// Load inductance in henries (0 for a purely resistive load)
    pub load_inductance: f64,

    /// Number of supply periods to sample
    pub cycles_to_simulate: usize,

    /// Samples per supply period
    pub samples_per_cycle: usize,
}

impl CircuitConfiguration {
    /// Create a resistive-load configuration with default resolution.
    pub fn new(
        topology: Topology,
        supply_amplitude: f64,
        supply_frequency: f64,
        load_resistance: f64,
    ) -> Self {
        Self {
            topology,
            supply_amplitude,
            supply_frequency,
            firing_angle_degrees: None,
            load_resistance,
            load_inductance: 0.0,
            cycles_to_simulate: DEFAULT_CYCLES,
            samples_per_cycle: DEFAULT_SAMPLES_PER_CYCLE,
        }
    }

    /// Set the firing angle in degrees.
    pub fn with_firing_angle(mut self, degrees: f64) -> Self {
        self.firing_angle_degrees = Some(degrees);
        self
    }

    /// Set the load inductance in henries.
    pub fn with_inductance(mut self, henries: f64) -> Self {
        self.load_inductance = henries;
        self
    }

    /// Set the number of periods to sample.
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.cycles_to_simulate = cycles;
        self
    }

    /// Set the number of samples per period.
    pub fn with_samples_per_cycle(mut self, samples: usize) -> Self {
        self.samples_per_cycle = samples;
        self
    }

    /// Check every field against its constraint.
    pub fn validate(&self) -> Result<()> {
        validate_configuration(self)
    }

    /// Angular supply frequency ω in rad/s.
    pub fn omega(&self) -> f64 {
        2.0 * PI * self.supply_frequency
    }

    /// Supply period in seconds.
    pub fn period(&self) -> f64 {
        1.0 / self.supply_frequency
    }

    /// Firing angle in radians (0 for uncontrolled topologies).
    pub fn firing_angle_radians(&self) -> f64 {
        if self.topology.is_controlled() {
            self.firing_angle_degrees.unwrap_or(0.0).to_radians()
        } else {
            0.0
        }
    }

    /// Whether the load has an inductive part.
    pub fn is_inductive(&self) -> bool {
        self.load_inductance > 0.0
    }

    /// Load reactance ωL in ohms.
    pub fn reactance(&self) -> f64 {
        self.omega() * self.load_inductance
    }

    /// Load impedance magnitude Z = √(R² + (ωL)²).
    pub fn impedance(&self) -> f64 {
        self.load_resistance.hypot(self.reactance())
    }

    /// Load angle φ = atan(ωL/R).
    pub fn load_angle(&self) -> f64 {
        self.reactance().atan2(self.load_resistance)
    }

    /// Peak of the voltage presented to the load while conducting.
    ///
    /// Three-phase bridges switch line-to-line voltages, √3 times the phase peak.
    pub fn output_peak(&self) -> f64 {
        if self.topology.is_three_phase() {
            3.0_f64.sqrt() * self.supply_amplitude
        } else {
            self.supply_amplitude
        }
    }

    /// Total number of output samples.
    pub fn sample_count(&self) -> usize {
        self.cycles_to_simulate * self.samples_per_cycle + 1
    }
}
