//! Conduction-interval analysis.
//!
//! For a given [`CircuitConfiguration`], the [`ConductionModel`] determines
//! within one supply period when the output is connected to the supply and
//! through which source phase (or line pair). It is a pure function of the
//! configuration and is recomputed on every call.
//!
//! Every topology is treated as `p` identical pulses per period (see
//! [`PulseGeometry`]). Each pulse is fired at `α` after its natural
//! commutation point and lasts until either the next pulse takes over
//! (continuous conduction) or the load current dies out at the extinction
//! angle (discontinuous conduction).

mod geometry;
mod load;

use std::f64::consts::PI;

use log::debug;

pub use geometry::{phase_count, phase_voltage, PulseGeometry};
pub use load::LoadLaw;

use crate::circuit::CircuitConfiguration;
use crate::error::{RectifierError, Result};
use crate::solver::{ExtinctionSolver, MIN_CONDUCTION_WIDTH};

/// One conduction interval within a supply period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductionInterval {
    /// Supply angle where conduction begins, in `[0, 2π)`
    pub start_phase: f64,
    /// Supply angle where conduction ends (may exceed 2π when wrapping)
    pub end_phase: f64,
    /// Conducting source: 0 half-wave, 0/1 full-wave, 0..5 six-pulse line pairs
    pub source_index: usize,
    /// Angle of the conducting source voltage at `start_phase`
    pub source_angle: f64,
}

impl ConductionInterval {
    /// Angular width of the interval.
    pub fn width(&self) -> f64 {
        self.end_phase - self.start_phase
    }

    /// Local angle ψ of θ inside this interval, if θ falls inside it.
    pub fn local_angle(&self, theta: f64) -> Option<f64> {
        let psi = (theta - self.start_phase).rem_euclid(2.0 * PI);
        (psi < self.width()).then_some(psi)
    }
}

/// Whether the load current ever rests at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConductionMode {
    /// Each pulse hands over to the next with non-zero current
    Continuous,
    /// Each pulse ends at the extinction angle before the next firing
    Discontinuous,
}

/// Conduction intervals of one supply period, plus what the waveform
/// generator needs to evaluate the load current inside them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConductionModel {
    /// Pulse layout of the topology
    pub geometry: PulseGeometry,
    /// Current law of the load
    pub load: LoadLaw,
    /// Firing angle α in radians (0 for uncontrolled topologies)
    pub firing_angle: f64,
    /// Continuous or discontinuous conduction
    pub mode: ConductionMode,
    /// Source angle where each pulse ends (β, or the next firing when continuous)
    pub extinction_angle: f64,
    /// Load current at the start of each pulse
    pub initial_current: f64,
    /// One interval per pulse, in firing order
    pub intervals: Vec<ConductionInterval>,
}

impl ConductionModel {
    /// Analyse a configuration with the default extinction solver.
    pub fn analyze(config: &CircuitConfiguration) -> Result<Self> {
        Self::analyze_with(config, &ExtinctionSolver::new())
    }

    /// Analyse a configuration with a custom extinction solver.
    ///
    /// Returns [`RectifierError::DegenerateResult`] when no pulse conducts.
    pub fn analyze_with(config: &CircuitConfiguration, solver: &ExtinctionSolver) -> Result<Self> {
        config.validate()?;

        let geometry = PulseGeometry::for_config(config);
        let load = LoadLaw::new(config, geometry.peak);
        let alpha = config.firing_angle_radians();

        let source_angle = geometry.source_offset + alpha;
        let limit = source_angle + geometry.segment_width;

        let (mode, extinction_angle) = match solver.solve_within(source_angle, load.phi, limit)? {
            Some(beta) if beta < limit => (ConductionMode::Discontinuous, beta),
            _ => (ConductionMode::Continuous, limit),
        };

        let width = extinction_angle - source_angle;
        if width <= MIN_CONDUCTION_WIDTH {
            return Err(RectifierError::degenerate(format!(
                "{} at firing angle {:.1}° never conducts",
                config.topology,
                alpha.to_degrees()
            )));
        }

        let initial_current = match mode {
            ConductionMode::Continuous => {
                load.steady_state_initial_current(source_angle, geometry.segment_width)
            }
            ConductionMode::Discontinuous => 0.0,
        };

        let intervals = (0..geometry.pulses)
            .map(|k| {
                let start_phase = (geometry.natural_start
                    + k as f64 * geometry.segment_width
                    + alpha)
                    .rem_euclid(2.0 * PI);
                ConductionInterval {
                    start_phase,
                    end_phase: start_phase + width,
                    source_index: k,
                    source_angle,
                }
            })
            .collect();

        debug!(
            "{}: {:?} conduction, width {:.4} rad, I0 = {:.4} A",
            config.topology, mode, width, initial_current
        );

        Ok(Self {
            geometry,
            load,
            firing_angle: alpha,
            mode,
            extinction_angle,
            initial_current,
            intervals,
        })
    }

    /// Conduction width of every pulse (radians).
    pub fn conduction_width(&self) -> f64 {
        self.extinction_angle - self.source_angle()
    }

    /// Source angle at which every pulse starts.
    pub fn source_angle(&self) -> f64 {
        self.geometry.source_offset + self.firing_angle
    }

    /// Find the conducting pulse at supply angle θ.
    ///
    /// Returns the interval and the local angle ψ since its start. The
    /// segment is located on the firing grid rather than by scanning the
    /// interval list, so adjacent continuous pulses leave no gaps.
    pub fn locate(&self, theta: f64) -> Option<(&ConductionInterval, f64)> {
        let width = self.geometry.segment_width;
        let offset = (theta - self.geometry.natural_start - self.firing_angle).rem_euclid(2.0 * PI);
        let segment = ((offset / width) as usize).min(self.geometry.pulses - 1);
        let psi = offset - segment as f64 * width;

        // Pulses are listed in firing order, so segment k is interval k
        let interval = &self.intervals[segment];
        let conducting = match self.mode {
            ConductionMode::Continuous => true,
            ConductionMode::Discontinuous => psi < self.conduction_width(),
        };
        conducting.then_some((interval, psi))
    }

    /// Output voltage and load current at supply angle θ.
    pub fn evaluate(&self, theta: f64) -> (f64, f64) {
        match self.locate(theta) {
            Some((interval, psi)) => {
                let voltage = self.geometry.source_voltage(interval.source_index, theta);
                let current = self
                    .load
                    .current(interval.source_angle, psi, self.initial_current);
                (voltage, current)
            }
            None => (0.0, 0.0),
        }
    }
}
