//! Performance metrics.
//!
//! The output voltage inside every conduction interval is a sinusoid, so its
//! average and RMS always come from analytic integrals over the intervals,
//! including R-L loads once the extinction angle is known. The load current
//! of an R-L load has no convenient square integral; its RMS value is taken
//! from the sampled waveform with the trapezoidal rule.
//! [`PerformanceMetrics::method`] records which path the current took.
//!
//! THD always needs the sampled waveform (see [`spectrum`]). When the
//! sampling is too coarse to resolve the ripple fundamental, THD is left
//! undefined and every other metric is still reported.

pub mod spectrum;

use std::f64::consts::PI;
use std::fmt;

use log::{debug, warn};

use crate::circuit::{CircuitConfiguration, Topology};
use crate::conduction::ConductionModel;
use crate::error::{RectifierError, Result};
use crate::solver::DEFAULT_MAX_HARMONICS;
use crate::waveform::{Waveform, WaveformSample};

use spectrum::HarmonicSpectrum;

/// Average voltages below this fraction of the peak count as zero.
pub const DEGENERATE_RATIO: f64 = 1e-9;

/// How the RMS load current was obtained.
///
/// Voltage moments and the average current are always analytic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// Every moment from analytic integrals over the conduction intervals
    ClosedForm,
    /// RMS current by the trapezoidal rule over one sampled period
    Trapezoidal,
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationMethod::ClosedForm => write!(f, "closed form"),
            IntegrationMethod::Trapezoidal => write!(f, "closed-form voltage, trapezoidal RMS current"),
        }
    }
}

/// First and second moments of output voltage and load current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Mean output voltage over one period (volts)
    pub average_voltage: f64,
    /// RMS output voltage over one period (volts)
    pub rms_voltage: f64,
    /// Mean load current over one period (amperes)
    pub average_current: f64,
    /// RMS load current over one period (amperes)
    pub rms_current: f64,
}

/// Scalar figures of merit of one rectifier operating point.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// DC (average) output voltage
    pub average_voltage: f64,
    /// RMS output voltage
    pub rms_voltage: f64,
    /// AC content relative to DC: sqrt(FF² − 1)
    pub ripple_factor: f64,
    /// RMS over average voltage
    pub form_factor: f64,
    /// DC share of the output power: Vdc² / Vrms²
    pub rectification_efficiency: f64,
    /// THD of the output voltage relative to the ripple fundamental (%),
    /// `None` when the sampling cannot resolve that fundamental
    pub thd_percent: Option<f64>,
    /// Peak reverse voltage a switch must block
    pub peak_inverse_voltage: f64,
    /// DC (average) load current
    pub average_current: f64,
    /// RMS load current
    pub rms_current: f64,
    /// Vdc · Idc
    pub dc_output_power: f64,
    /// Vrms · Irms
    pub ac_output_power: f64,
    /// THD of the load current relative to the ripple fundamental (%)
    pub current_thd_percent: Option<f64>,
    /// Frequency of the output ripple fundamental (Hz)
    pub ripple_frequency: f64,
    /// How the RMS current was obtained
    pub method: IntegrationMethod,
}

/// Derives [`PerformanceMetrics`] from a conduction model and its waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsCalculator {
    /// Highest supply harmonic included in THD
    pub max_harmonics: usize,
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCalculator {
    /// Create a calculator with the default harmonic count.
    pub fn new() -> Self {
        Self {
            max_harmonics: DEFAULT_MAX_HARMONICS,
        }
    }

    /// Set the highest harmonic included in THD.
    pub fn with_max_harmonics(mut self, max_harmonics: usize) -> Self {
        self.max_harmonics = max_harmonics;
        self
    }

    /// Compute all metrics.
    pub fn compute(
        &self,
        config: &CircuitConfiguration,
        model: &ConductionModel,
        waveform: &Waveform,
    ) -> Result<PerformanceMetrics> {
        let method = if model.load.is_inductive() {
            IntegrationMethod::Trapezoidal
        } else {
            IntegrationMethod::ClosedForm
        };

        let mut moments = closed_form_moments(model);
        if method == IntegrationMethod::Trapezoidal {
            moments.rms_current = trapezoidal_moments(waveform.first_cycle()).rms_current;
        }
        debug!("{}: moments ({}): {:?}", config.topology, method, moments);

        if moments.average_voltage <= DEGENERATE_RATIO * model.geometry.peak {
            return Err(RectifierError::degenerate(format!(
                "average output voltage {:.3e} V is effectively zero; form and ripple factor are undefined",
                moments.average_voltage
            )));
        }

        let form_factor = moments.rms_voltage / moments.average_voltage;
        // FF ≥ 1 analytically; rounding can dip just below
        let ripple_factor = (form_factor * form_factor - 1.0).max(0.0).sqrt();
        let rectification_efficiency = (moments.average_voltage / moments.rms_voltage).powi(2);

        let pulses = config.topology.pulse_number();
        let period = &waveform.first_cycle()[..config.samples_per_cycle];
        let voltages: Vec<f64> = period.iter().map(|s| s.voltage).collect();
        let currents: Vec<f64> = period.iter().map(|s| s.current).collect();
        let thd = HarmonicSpectrum::from_period(&voltages).thd(pulses, self.max_harmonics);
        let current_thd = HarmonicSpectrum::from_period(&currents).thd(pulses, self.max_harmonics);
        if thd.is_none() {
            warn!(
                "{}: {} samples per cycle cannot resolve harmonic {}; THD undefined",
                config.topology, config.samples_per_cycle, pulses
            );
        }

        Ok(PerformanceMetrics {
            average_voltage: moments.average_voltage,
            rms_voltage: moments.rms_voltage,
            ripple_factor,
            form_factor,
            rectification_efficiency,
            thd_percent: thd.map(|t| t.thd_percent),
            peak_inverse_voltage: peak_inverse_voltage(config),
            average_current: moments.average_current,
            rms_current: moments.rms_current,
            dc_output_power: moments.average_voltage * moments.average_current,
            ac_output_power: moments.rms_voltage * moments.rms_current,
            current_thd_percent: current_thd.map(|t| t.thd_percent),
            ripple_frequency: pulses as f64 * config.supply_frequency,
            method,
        })
    }
}

/// Peak inverse voltage across a blocking switch.
///
/// Full-wave uses the center-tapped rating of 2·Vm, which also covers the bridge.
pub fn peak_inverse_voltage(config: &CircuitConfiguration) -> f64 {
    let vm = config.supply_amplitude;
    match config.topology {
        Topology::HalfWaveUncontrolled | Topology::HalfWaveControlled => vm,
        Topology::FullWaveUncontrolled | Topology::FullWaveControlled => 2.0 * vm,
        Topology::ThreePhaseUncontrolled | Topology::ThreePhaseControlled => 3f64.sqrt() * vm,
    }
}

/// Analytic moments over the conduction intervals.
///
/// The voltage moments and the average current (Vdc/R, as the inductor
/// voltage averages to zero in steady state) hold for any load. The RMS
/// current Vrms/R holds only for a resistive load.
///
/// Each interval follows `Vpk·sin u` for u from ϑ to ϑ + W:
///
/// ```text
/// ∫ Vpk sin u du  = Vpk [cos ϑ − cos(ϑ+W)]
/// ∫ Vpk² sin² u du = Vpk² [W/2 − (sin 2(ϑ+W) − sin 2ϑ)/4]
/// ```
pub fn closed_form_moments(model: &ConductionModel) -> Moments {
    let peak = model.geometry.peak;
    let (mut area, mut square_area) = (0.0, 0.0);

    for interval in &model.intervals {
        let from = interval.source_angle;
        let to = from + interval.width();
        area += peak * (from.cos() - to.cos());
        square_area +=
            peak * peak * (0.5 * interval.width() - ((2.0 * to).sin() - (2.0 * from).sin()) / 4.0);
    }

    let average_voltage = area / (2.0 * PI);
    let rms_voltage = (square_area / (2.0 * PI)).max(0.0).sqrt();
    let resistance = model.load.resistance;

    Moments {
        average_voltage,
        rms_voltage,
        average_current: average_voltage / resistance,
        rms_current: rms_voltage / resistance,
    }
}

/// Trapezoidal moments over one period of samples (closing sample included).
pub fn trapezoidal_moments(period: &[WaveformSample]) -> Moments {
    Moments {
        average_voltage: trapezoidal_mean(period, |s| s.voltage),
        rms_voltage: trapezoidal_mean(period, |s| s.voltage * s.voltage).sqrt(),
        average_current: trapezoidal_mean(period, |s| s.current),
        rms_current: trapezoidal_mean(period, |s| s.current * s.current).sqrt(),
    }
}

fn trapezoidal_mean(period: &[WaveformSample], f: impl Fn(&WaveformSample) -> f64) -> f64 {
    let intervals = period.len().saturating_sub(1).max(1) as f64;
    period
        .windows(2)
        .map(|pair| 0.5 * (f(&pair[0]) + f(&pair[1])))
        .sum::<f64>()
        / intervals
}
