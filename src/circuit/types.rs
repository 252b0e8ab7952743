//! Core types for circuit representation.

use std::fmt;
use std::str::FromStr;

use crate::error::RectifierError;

/// The six rectifier topologies handled by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Single diode, positive half-cycle only
    HalfWaveUncontrolled,
    /// Diode bridge (or center-tap), both half-cycles
    FullWaveUncontrolled,
    /// Single thyristor fired at α
    HalfWaveControlled,
    /// Thyristor bridge fired at α and π + α
    FullWaveControlled,
    /// Six-pulse diode bridge
    ThreePhaseUncontrolled,
    /// Six-pulse thyristor bridge
    ThreePhaseControlled,
}

impl Topology {
    /// All topologies, in menu order.
    pub const ALL: [Topology; 6] = [
        Topology::HalfWaveUncontrolled,
        Topology::FullWaveUncontrolled,
        Topology::HalfWaveControlled,
        Topology::FullWaveControlled,
        Topology::ThreePhaseUncontrolled,
        Topology::ThreePhaseControlled,
    ];

    /// Whether the switches are thyristors with a firing angle.
    pub fn is_controlled(&self) -> bool {
        match self {
            Topology::HalfWaveUncontrolled
            | Topology::FullWaveUncontrolled
            | Topology::ThreePhaseUncontrolled => false,
            Topology::HalfWaveControlled
            | Topology::FullWaveControlled
            | Topology::ThreePhaseControlled => true,
        }
    }

    /// Whether the supply is a balanced three-phase source.
    pub fn is_three_phase(&self) -> bool {
        matches!(
            self,
            Topology::ThreePhaseUncontrolled | Topology::ThreePhaseControlled
        )
    }

    /// Number of output pulses per supply period.
    pub fn pulse_number(&self) -> usize {
        match self {
            Topology::HalfWaveUncontrolled | Topology::HalfWaveControlled => 1,
            Topology::FullWaveUncontrolled | Topology::FullWaveControlled => 2,
            Topology::ThreePhaseUncontrolled | Topology::ThreePhaseControlled => 6,
        }
    }

    /// Upper bound of the firing-angle domain in degrees.
    ///
    /// Three-phase bridges are limited to the practical 150° range.
    pub fn max_firing_angle_degrees(&self) -> f64 {
        if self.is_three_phase() {
            150.0
        } else {
            180.0
        }
    }

    /// Kebab-case identifier used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::HalfWaveUncontrolled => "half-wave-uncontrolled",
            Topology::FullWaveUncontrolled => "full-wave-uncontrolled",
            Topology::HalfWaveControlled => "half-wave-controlled",
            Topology::FullWaveControlled => "full-wave-controlled",
            Topology::ThreePhaseUncontrolled => "three-phase-uncontrolled",
            Topology::ThreePhaseControlled => "three-phase-controlled",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::HalfWaveUncontrolled => "Half-Wave Uncontrolled",
            Topology::FullWaveUncontrolled => "Full-Wave Uncontrolled",
            Topology::HalfWaveControlled => "Half-Wave Controlled",
            Topology::FullWaveControlled => "Full-Wave Controlled",
            Topology::ThreePhaseUncontrolled => "Three-Phase Uncontrolled",
            Topology::ThreePhaseControlled => "Three-Phase Controlled",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Topology {
    type Err = RectifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Topology::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| RectifierError::UnknownTopology {
                name: s.to_string(),
            })
    }
}
