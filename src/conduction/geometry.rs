//! Pulse geometry of each topology.

use std::f64::consts::{FRAC_PI_3, FRAC_PI_6, PI};

use crate::circuit::{CircuitConfiguration, Topology};

/// How one supply period is divided into output pulses.
///
/// Segment `k` begins at `natural_start + k·segment_width + α`; while it
/// conducts the load sees `peak·sin(source_offset + α + ψ)` for local angle ψ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseGeometry {
    /// Number of segments per period
    pub pulses: usize,
    /// Width of one segment (radians)
    pub segment_width: f64,
    /// Natural commutation angle of segment 0 (radians)
    pub natural_start: f64,
    /// Source voltage angle at the natural commutation point (radians)
    pub source_offset: f64,
    /// Peak of the conducting source voltage (volts)
    pub peak: f64,
}

impl PulseGeometry {
    /// Geometry for a configuration.
    pub fn for_config(config: &CircuitConfiguration) -> Self {
        let pulses = config.topology.pulse_number();
        let (natural_start, source_offset) = match config.topology {
            Topology::HalfWaveUncontrolled
            | Topology::HalfWaveControlled
            | Topology::FullWaveUncontrolled
            | Topology::FullWaveControlled => (0.0, 0.0),
            // Line voltage v_ab peaks at θ = π/3, the middle of segment 0
            Topology::ThreePhaseUncontrolled | Topology::ThreePhaseControlled => {
                (FRAC_PI_6, FRAC_PI_3)
            }
        };

        Self {
            pulses,
            segment_width: 2.0 * PI / pulses as f64,
            natural_start,
            source_offset,
            peak: config.output_peak(),
        }
    }

    /// Instantaneous voltage of source `index` at supply angle θ.
    ///
    /// Single-phase: index 0 is `Vm·sin θ`, index 1 the inverted half.
    /// Three-phase: index k is the line pair ab, ac, bc, ba, ca, cb in turn,
    /// `√3·Vm·sin(θ + π/6 − k·π/3)`.
    pub fn source_voltage(&self, index: usize, theta: f64) -> f64 {
        match self.pulses {
            6 => self.peak * (theta + FRAC_PI_6 - index as f64 * FRAC_PI_3).sin(),
            _ if index % 2 == 1 => -self.peak * theta.sin(),
            _ => self.peak * theta.sin(),
        }
    }
}

/// Number of supply phases: 1 single-phase, 3 three-phase.
pub fn phase_count(config: &CircuitConfiguration) -> usize {
    if config.topology.is_three_phase() {
        3
    } else {
        1
    }
}

/// Instantaneous voltage of supply phase `phase` (0 = a) at angle θ.
///
/// Phases lag each other by 2π/3.
pub fn phase_voltage(config: &CircuitConfiguration, phase: usize, theta: f64) -> f64 {
    config.supply_amplitude * (theta - phase as f64 * 2.0 * FRAC_PI_3).sin()
}
