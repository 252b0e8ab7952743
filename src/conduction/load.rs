//! Load current law during one conduction segment.

use crate::circuit::CircuitConfiguration;

/// Current response of the R or R-L load to a sinusoidal segment voltage.
///
/// With the segment voltage `Vpk·sin(ϑ + ψ)` and initial current `I₀`:
///
/// ```text
/// i(ψ) = (Vpk/Z)[sin(ϑ + ψ − φ) − sin(ϑ − φ)e^{−ψ/tan φ}] + I₀ e^{−ψ/tan φ}
/// ```
///
/// which reduces to `v/R` for a resistive load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadLaw {
    /// Peak of the segment voltage (volts)
    pub peak_voltage: f64,
    /// Load resistance (ohms)
    pub resistance: f64,
    /// Load impedance magnitude (ohms)
    pub impedance: f64,
    /// Load angle φ (radians)
    pub phi: f64,
}

impl LoadLaw {
    /// Build the law for a configuration and segment voltage peak.
    pub fn new(config: &CircuitConfiguration, peak_voltage: f64) -> Self {
        Self {
            peak_voltage,
            resistance: config.load_resistance,
            impedance: config.impedance(),
            phi: config.load_angle(),
        }
    }

    /// Whether the load has an inductive part.
    pub fn is_inductive(&self) -> bool {
        self.phi > 0.0
    }

    /// Decay factor `e^{−ψ/tan φ}` over local angle ψ.
    pub fn decay(&self, psi: f64) -> f64 {
        if self.is_inductive() {
            (-psi / self.phi.tan()).exp()
        } else {
            0.0
        }
    }

    /// Current at local angle ψ of a segment starting at source angle ϑ.
    pub fn current(&self, source_angle: f64, psi: f64, initial_current: f64) -> f64 {
        if !self.is_inductive() {
            return self.peak_voltage * (source_angle + psi).sin() / self.resistance;
        }

        let decay = self.decay(psi);
        let forced = (source_angle + psi - self.phi).sin();
        let natural = (source_angle - self.phi).sin() * decay;
        self.peak_voltage / self.impedance * (forced - natural) + initial_current * decay
    }

    /// Periodic steady-state current at the start of each segment when
    /// conduction is continuous over segments of width `w`.
    ///
    /// The fixed point of `I₀ ↦ i(w; I₀)` is `i(w; 0) / (1 − e^{−w/tan φ})`.
    pub fn steady_state_initial_current(&self, source_angle: f64, width: f64) -> f64 {
        if !self.is_inductive() {
            return 0.0;
        }
        self.current(source_angle, width, 0.0) / (1.0 - self.decay(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Topology;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn rl_config() -> CircuitConfiguration {
        CircuitConfiguration::new(Topology::FullWaveUncontrolled, 100.0, 50.0, 10.0)
            .with_inductance(0.05)
    }

    #[test]
    fn test_resistive_current_is_ohmic() {
        let config = CircuitConfiguration::new(Topology::HalfWaveUncontrolled, 100.0, 50.0, 20.0);
        let law = LoadLaw::new(&config, 100.0);
        assert_relative_eq!(law.current(0.0, PI / 2.0, 0.0), 5.0);
    }

    #[test]
    fn test_zero_start_current_starts_at_zero() {
        let config = rl_config();
        let law = LoadLaw::new(&config, 100.0);
        assert!(law.current(0.4, 0.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_current_satisfies_rl_equation() {
        // ωL di/dθ + R i = v
        let config = rl_config();
        let law = LoadLaw::new(&config, 100.0);
        let (source_angle, i0, psi, h) = (0.3, 2.0, 1.1, 1e-6);

        let di = (law.current(source_angle, psi + h, i0) - law.current(source_angle, psi - h, i0))
            / (2.0 * h);
        let lhs = config.reactance() * di + config.load_resistance * law.current(source_angle, psi, i0);
        let v = 100.0 * (source_angle + psi).sin();
        assert_relative_eq!(lhs, v, max_relative = 1e-6);
    }

    #[test]
    fn test_steady_state_is_periodic() {
        let config = rl_config();
        let law = LoadLaw::new(&config, 100.0);
        let i0 = law.steady_state_initial_current(0.0, PI);
        assert!(i0 > 0.0);
        assert_relative_eq!(law.current(0.0, PI, i0), i0, max_relative = 1e-12);
    }
}
