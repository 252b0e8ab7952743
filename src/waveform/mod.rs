//! Waveform generation.
//!
//! Samples the rectifier output over `cycles_to_simulate` supply periods at
//! `samples_per_cycle` resolution. At each sample the supply angle decides,
//! through the [`ConductionModel`], which closed-form expression applies.
//!
//! The phase of a sample is derived from its index modulo the samples per
//! cycle, so every cycle is a bit-identical copy of the first.

use std::f64::consts::PI;

use log::debug;

use crate::circuit::CircuitConfiguration;
use crate::conduction::{phase_count, phase_voltage, ConductionModel};
use crate::error::Result;

/// One output sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSample {
    /// Time since the supply zero crossing (seconds)
    pub time: f64,
    /// Instantaneous output voltage (volts)
    pub voltage: f64,
    /// Instantaneous load current (amperes)
    pub current: f64,
}

/// A sampled rectifier waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Output samples, `cycles × samples_per_cycle + 1` long
    pub samples: Vec<WaveformSample>,
    /// Supply voltage per phase, each column aligned with `samples`:
    /// one column single-phase, phases a, b, c for three-phase
    pub supply: Vec<Vec<f64>>,
    /// Samples per supply period
    pub samples_per_cycle: usize,
}

impl Waveform {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the waveform holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The first supply period, including its closing sample.
    pub fn first_cycle(&self) -> &[WaveformSample] {
        let end = (self.samples_per_cycle + 1).min(self.samples.len());
        &self.samples[..end]
    }

    /// Number of supply phases.
    pub fn phase_count(&self) -> usize {
        self.supply.len()
    }

    /// Voltages of supply phase `phase` (0 = a), if it exists.
    pub fn supply_phase(&self, phase: usize) -> Option<&[f64]> {
        self.supply.get(phase).map(Vec::as_slice)
    }

    /// Sample times.
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    /// Output voltages.
    pub fn voltages(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.voltage).collect()
    }

    /// Load currents.
    pub fn currents(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.current).collect()
    }
}

/// Produces [`Waveform`]s from a configuration and its conduction model.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveformGenerator;

impl WaveformGenerator {
    /// Create a generator.
    pub fn new() -> Self {
        Self
    }

    /// Sample the output described by `model`.
    pub fn generate(&self, config: &CircuitConfiguration, model: &ConductionModel) -> Waveform {
        let per_cycle = config.samples_per_cycle;
        let count = config.sample_count();
        let dt = config.period() / per_cycle as f64;

        let mut samples = Vec::with_capacity(count);
        let mut supply: Vec<Vec<f64>> = (0..phase_count(config))
            .map(|_| Vec::with_capacity(count))
            .collect();

        for k in 0..count {
            let theta = 2.0 * PI * (k % per_cycle) as f64 / per_cycle as f64;
            let (voltage, current) = model.evaluate(theta);
            samples.push(WaveformSample {
                time: k as f64 * dt,
                voltage,
                current,
            });
            for (phase, column) in supply.iter_mut().enumerate() {
                column.push(phase_voltage(config, phase, theta));
            }
        }

        debug!(
            "{}: generated {} samples over {} cycles",
            config.topology, count, config.cycles_to_simulate
        );

        Waveform {
            samples,
            supply,
            samples_per_cycle: per_cycle,
        }
    }
}

/// Analyse a configuration and sample its output in one call.
pub fn generate_waveform(config: &CircuitConfiguration) -> Result<Waveform> {
    let model = ConductionModel::analyze(config)?;
    Ok(WaveformGenerator::new().generate(config, &model))
}
