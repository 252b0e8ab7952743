//! Configuration validation.

use crate::error::{RectifierError, Result};

use super::CircuitConfiguration;

/// Validate a configuration before analysis.
///
/// Checks:
/// - Amplitude, frequency and resistance are finite and positive
/// - Inductance is finite and non-negative
/// - Cycle count and resolution are large enough
/// - Firing angle presence matches the topology and lies in its domain
pub fn validate_configuration(config: &CircuitConfiguration) -> Result<()> {
    require_positive("supply_amplitude", config.supply_amplitude)?;
    require_positive("supply_frequency", config.supply_frequency)?;
    require_positive("load_resistance", config.load_resistance)?;

    if !config.load_inductance.is_finite() || config.load_inductance < 0.0 {
        return Err(RectifierError::invalid(
            "load_inductance",
            format!("must be finite and >= 0 (got {})", config.load_inductance),
        ));
    }

    if config.cycles_to_simulate < 1 {
        return Err(RectifierError::invalid(
            "cycles_to_simulate",
            "must be at least 1",
        ));
    }

    if config.samples_per_cycle < 2 {
        return Err(RectifierError::invalid(
            "samples_per_cycle",
            format!("must be at least 2 (got {})", config.samples_per_cycle),
        ));
    }

    let topology = config.topology;
    match (topology.is_controlled(), config.firing_angle_degrees) {
        (false, Some(angle)) => Err(RectifierError::invalid(
            "firing_angle_degrees",
            format!("{} rectifier takes no firing angle (got {}°)", topology, angle),
        )),
        (false, None) => Ok(()),
        (true, None) => Err(RectifierError::invalid(
            "firing_angle_degrees",
            format!("{} rectifier requires a firing angle", topology),
        )),
        (true, Some(angle)) => {
            let max = topology.max_firing_angle_degrees();
            if !angle.is_finite() || !(0.0..=max).contains(&angle) {
                Err(RectifierError::invalid(
                    "firing_angle_degrees",
                    format!("must lie in [0°, {}°] for {} (got {}°)", max, topology, angle),
                ))
            } else {
                Ok(())
            }
        }
    }
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RectifierError::invalid(
            field,
            format!("must be finite and > 0 (got {})", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Topology;

    fn base(topology: Topology) -> CircuitConfiguration {
        CircuitConfiguration::new(topology, 100.0, 50.0, 10.0)
    }

    #[test]
    fn test_valid_configurations() {
        assert!(base(Topology::HalfWaveUncontrolled).validate().is_ok());
        assert!(base(Topology::ThreePhaseControlled)
            .with_firing_angle(30.0)
            .with_inductance(0.1)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_non_positive_fields() {
        let mut config = base(Topology::FullWaveUncontrolled);
        config.load_resistance = 0.0;
        assert_eq!(config.validate().unwrap_err().field(), Some("load_resistance"));

        let mut config = base(Topology::FullWaveUncontrolled);
        config.supply_frequency = -50.0;
        assert_eq!(config.validate().unwrap_err().field(), Some("supply_frequency"));

        let mut config = base(Topology::FullWaveUncontrolled);
        config.supply_amplitude = f64::NAN;
        assert_eq!(config.validate().unwrap_err().field(), Some("supply_amplitude"));

        let config = base(Topology::FullWaveUncontrolled).with_inductance(-1e-3);
        assert_eq!(config.validate().unwrap_err().field(), Some("load_inductance"));
    }

    #[test]
    fn test_resolution_limits() {
        let config = base(Topology::HalfWaveUncontrolled).with_samples_per_cycle(1);
        assert_eq!(config.validate().unwrap_err().field(), Some("samples_per_cycle"));

        let config = base(Topology::HalfWaveUncontrolled).with_cycles(0);
        assert_eq!(config.validate().unwrap_err().field(), Some("cycles_to_simulate"));
    }

    #[test]
    fn test_firing_angle_pairing() {
        let err = base(Topology::HalfWaveUncontrolled)
            .with_firing_angle(30.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("firing_angle_degrees"));

        let err = base(Topology::FullWaveControlled).validate().unwrap_err();
        assert_eq!(err.field(), Some("firing_angle_degrees"));
    }

    #[test]
    fn test_firing_angle_range_is_not_clamped() {
        assert!(base(Topology::HalfWaveControlled)
            .with_firing_angle(-1.0)
            .validate()
            .is_err());
        assert!(base(Topology::HalfWaveControlled)
            .with_firing_angle(181.0)
            .validate()
            .is_err());
        assert!(base(Topology::ThreePhaseControlled)
            .with_firing_angle(151.0)
            .validate()
            .is_err());
        // The limit itself is left to the computation, which reports it as degenerate
        assert!(base(Topology::HalfWaveControlled)
            .with_firing_angle(180.0)
            .validate()
            .is_ok());
    }
}
