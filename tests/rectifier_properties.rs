//! End-to-end checks of the textbook rectifier relations.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use rectifier_core::{
    simulate, CircuitConfiguration, ConductionMode, IntegrationMethod, RectifierError,
    SimulationResult, Topology,
};

const VM: f64 = 230.0;
const FREQUENCY: f64 = 50.0;
const R: f64 = 15.0;

fn config(topology: Topology) -> CircuitConfiguration {
    CircuitConfiguration::new(topology, VM, FREQUENCY, R)
}

fn controlled(topology: Topology, alpha: f64) -> CircuitConfiguration {
    config(topology).with_firing_angle(alpha)
}

fn run(config: &CircuitConfiguration) -> SimulationResult {
    simulate(config).unwrap_or_else(|e| panic!("{:?} failed: {}", config, e))
}

/// Average voltage, with a degenerate operating point counted as zero.
fn average_or_zero(config: &CircuitConfiguration) -> f64 {
    match simulate(config) {
        Ok(result) => result.metrics.average_voltage,
        Err(RectifierError::DegenerateResult { .. }) => 0.0,
        Err(e) => panic!("unexpected error: {}", e),
    }
}

#[test]
fn half_wave_uncontrolled_average_and_rms() {
    let m = run(&config(Topology::HalfWaveUncontrolled)).metrics;
    assert_relative_eq!(m.average_voltage, VM / PI, max_relative = 1e-6);
    assert_relative_eq!(m.rms_voltage, VM / 2.0, max_relative = 1e-6);
    assert_relative_eq!(m.average_current, VM / PI / R, max_relative = 1e-6);
}

#[test]
fn full_wave_uncontrolled_average_and_rms() {
    let m = run(&config(Topology::FullWaveUncontrolled)).metrics;
    assert_relative_eq!(m.average_voltage, 2.0 * VM / PI, max_relative = 1e-6);
    assert_relative_eq!(m.rms_voltage, VM / 2f64.sqrt(), max_relative = 1e-6);
}

#[test]
fn half_wave_controlled_follows_cosine_law() {
    for alpha in [0.0, 30.0, 60.0, 90.0, 135.0, 170.0] {
        let m = run(&controlled(Topology::HalfWaveControlled, alpha)).metrics;
        let expected = VM / (2.0 * PI) * (1.0 + f64::to_radians(alpha).cos());
        assert_relative_eq!(m.average_voltage, expected, max_relative = 1e-6);
    }
}

#[test]
fn controlled_at_zero_matches_uncontrolled() {
    let pairs = [
        (Topology::HalfWaveUncontrolled, Topology::HalfWaveControlled),
        (Topology::FullWaveUncontrolled, Topology::FullWaveControlled),
        (Topology::ThreePhaseUncontrolled, Topology::ThreePhaseControlled),
    ];
    for (uncontrolled, controlled_topology) in pairs {
        let a = run(&config(uncontrolled)).metrics;
        let b = run(&controlled(controlled_topology, 0.0)).metrics;
        assert_relative_eq!(a.average_voltage, b.average_voltage, max_relative = 1e-9);
        assert_relative_eq!(a.rms_voltage, b.rms_voltage, max_relative = 1e-9);
    }
}

#[test]
fn full_wave_controlled_resistive_average() {
    let m = run(&controlled(Topology::FullWaveControlled, 60.0)).metrics;
    assert_relative_eq!(m.average_voltage, VM / PI * 1.5, max_relative = 1e-6);
}

#[test]
fn three_phase_uncontrolled_average_and_piv() {
    let m = run(&config(Topology::ThreePhaseUncontrolled)).metrics;
    assert_relative_eq!(m.average_voltage, 3.0 * 3f64.sqrt() / PI * VM, max_relative = 1e-6);
    assert_relative_eq!(m.peak_inverse_voltage, 3f64.sqrt() * VM, max_relative = 1e-12);
    assert_relative_eq!(m.ripple_frequency, 6.0 * FREQUENCY);
}

#[test]
fn three_phase_controlled_follows_cosine_then_discontinuous_law() {
    let k = 3.0 * 3f64.sqrt() / PI * VM;
    let m = run(&controlled(Topology::ThreePhaseControlled, 45.0)).metrics;
    assert_relative_eq!(m.average_voltage, k * f64::to_radians(45.0).cos(), max_relative = 1e-6);

    let m = run(&controlled(Topology::ThreePhaseControlled, 90.0)).metrics;
    let expected = k * (1.0 + f64::to_radians(90.0 + 60.0).cos());
    assert_relative_eq!(m.average_voltage, expected, max_relative = 1e-6);
}

#[test]
fn waveform_is_periodic_across_cycles() {
    for topology in Topology::ALL {
        let mut cfg = config(topology).with_cycles(4).with_samples_per_cycle(360);
        if topology.is_controlled() {
            cfg = cfg.with_firing_angle(35.0).with_inductance(0.03);
        }
        let samples = run(&cfg).waveform.samples;
        assert_eq!(samples.len(), 4 * 360 + 1);
        for j in 0..3 * 360 {
            assert_eq!(samples[j].voltage, samples[j + 360].voltage, "{} sample {}", topology, j);
            assert_eq!(samples[j].current, samples[j + 360].current, "{} sample {}", topology, j);
        }
    }
}

#[test]
fn average_voltage_never_increases_with_firing_angle() {
    let topologies = [
        Topology::HalfWaveControlled,
        Topology::FullWaveControlled,
        Topology::ThreePhaseControlled,
    ];
    for topology in topologies {
        for inductance in [0.0, 0.05] {
            let max = topology.max_firing_angle_degrees();
            let mut previous = f64::INFINITY;
            let mut alpha = 0.0;
            while alpha <= max {
                let cfg = controlled(topology, alpha)
                    .with_inductance(inductance)
                    .with_samples_per_cycle(4000);
                let average = average_or_zero(&cfg);
                assert!(
                    average <= previous + 1e-6 * VM,
                    "{} L={} α={}: {} > {}",
                    topology,
                    inductance,
                    alpha,
                    average,
                    previous
                );
                previous = average;
                alpha += 5.0;
            }
        }
    }
}

#[test]
fn inductive_average_voltage_is_monotonic_at_default_resolution() {
    // 0.1° steps move the firing instant across the 0.36° sampling grid
    let topologies = [
        Topology::HalfWaveControlled,
        Topology::FullWaveControlled,
        Topology::ThreePhaseControlled,
    ];
    for topology in topologies {
        let steps = (topology.max_firing_angle_degrees() * 10.0) as usize;
        let mut previous = f64::INFINITY;
        for step in 0..=steps {
            let alpha = step as f64 / 10.0;
            let cfg = CircuitConfiguration::new(topology, 100.0, FREQUENCY, 10.0)
                .with_firing_angle(alpha)
                .with_inductance(0.05);
            let average = average_or_zero(&cfg);
            assert!(
                average <= previous + 1e-9 * 100.0,
                "{} α={}: {} > {}",
                topology,
                alpha,
                average,
                previous
            );
            previous = average;
        }
    }
}

#[test]
fn coarse_resolution_keeps_scalar_metrics() {
    let cfg = config(Topology::ThreePhaseUncontrolled).with_samples_per_cycle(12);
    let m = run(&cfg).metrics;
    assert_eq!(m.thd_percent, None);
    assert_relative_eq!(m.average_voltage, 3.0 * 3f64.sqrt() / PI * VM, max_relative = 1e-9);

    let cfg = config(Topology::HalfWaveUncontrolled).with_samples_per_cycle(2);
    let m = run(&cfg).metrics;
    assert_eq!(m.thd_percent, None);
    assert_relative_eq!(m.average_voltage, VM / PI, max_relative = 1e-9);
}

#[test]
fn firing_at_maximum_is_degenerate() {
    for (topology, alpha) in [
        (Topology::HalfWaveControlled, 180.0),
        (Topology::FullWaveControlled, 180.0),
        (Topology::ThreePhaseControlled, 150.0),
    ] {
        let result = simulate(&controlled(topology, alpha));
        assert!(
            matches!(result, Err(RectifierError::DegenerateResult { .. })),
            "{} at {}° gave {:?}",
            topology,
            alpha,
            result.map(|r| r.metrics)
        );
    }
}

#[test]
fn firing_beyond_maximum_is_invalid() {
    let err = simulate(&controlled(Topology::ThreePhaseControlled, 160.0)).unwrap_err();
    assert_eq!(err.field(), Some("firing_angle_degrees"));
}

#[test]
fn repeated_runs_are_identical() {
    let cfg = controlled(Topology::FullWaveControlled, 20.0).with_inductance(0.08);
    let first = run(&cfg);
    let second = run(&cfg);
    assert_eq!(first.waveform, second.waveform);
    assert_eq!(first.metrics, second.metrics);
}

#[test]
fn inductive_half_wave_conducts_past_pi_with_numeric_metrics() {
    let cfg = controlled(Topology::HalfWaveControlled, 30.0).with_inductance(0.1);
    let result = run(&cfg);
    assert_eq!(result.method(), IntegrationMethod::Trapezoidal);
    assert_eq!(result.conduction.mode, ConductionMode::Discontinuous);
    assert!(result.conduction.extinction_angle > PI);

    // Negative output voltage appears after π while current still flows
    assert!(result
        .waveform
        .samples
        .iter()
        .any(|s| s.voltage < 0.0 && s.current > 0.0));
    // Less average voltage than the resistive case at the same firing angle
    let resistive = run(&controlled(Topology::HalfWaveControlled, 30.0)).metrics;
    assert!(result.metrics.average_voltage < resistive.average_voltage);
}

#[test]
fn highly_inductive_full_wave_follows_continuous_law() {
    // φ ≈ 89°: conduction is continuous and Vdc = (2Vm/π)cos α
    let cfg = controlled(Topology::FullWaveControlled, 40.0)
        .with_inductance(2.0)
        .with_samples_per_cycle(20_000);
    let result = run(&cfg);
    assert_eq!(result.conduction.mode, ConductionMode::Continuous);
    let expected = 2.0 * VM / PI * f64::to_radians(40.0).cos();
    assert_relative_eq!(result.metrics.average_voltage, expected, max_relative = 1e-3);
}

#[test]
fn trapezoidal_metrics_approach_closed_form_as_inductance_vanishes() {
    let resistive = controlled(Topology::HalfWaveControlled, 45.0).with_samples_per_cycle(20_000);
    let exact = run(&resistive).metrics;

    let inductive = run(&resistive.clone().with_inductance(1e-7)).metrics;
    assert_eq!(inductive.method, IntegrationMethod::Trapezoidal);
    assert_relative_eq!(inductive.average_voltage, exact.average_voltage, max_relative = 1e-3);
    assert_relative_eq!(inductive.rms_voltage, exact.rms_voltage, max_relative = 1e-3);
    assert_relative_eq!(inductive.average_current, exact.average_current, max_relative = 1e-3);
}
