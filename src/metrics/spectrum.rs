//! Harmonic decomposition and Total Harmonic Distortion (THD).
//!
//! The waveform is periodic and sampled synchronously with the supply, so an
//! FFT over exactly one period puts harmonic `n` of the supply frequency in
//! bin `n` with no leakage and no window is needed.
//!
//! THD = sqrt(sum of squared harmonic amplitudes) / fundamental amplitude × 100%

use rustfft::{num_complex::Complex, FftPlanner};

/// Fundamental amplitudes below this count as absent.
const MIN_FUNDAMENTAL: f64 = 1e-20;

/// Amplitude spectrum of one period.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicSpectrum {
    /// Peak amplitude per harmonic of the supply frequency; index 0 is the DC value
    pub amplitudes: Vec<f64>,
}

/// Result of a THD evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ThdResult {
    /// THD as a percentage
    pub thd_percent: f64,
    /// Harmonic number used as the fundamental
    pub fundamental: usize,
    /// Peak amplitude of the fundamental
    pub fundamental_magnitude: f64,
    /// Root-sum-square of the other harmonic amplitudes
    pub harmonic_rss: f64,
    /// Number of harmonics included besides the fundamental
    pub num_harmonics: usize,
}

impl HarmonicSpectrum {
    /// Decompose one period of uniformly spaced samples.
    ///
    /// `period` must hold exactly one period, without the closing sample.
    pub fn from_period(period: &[f64]) -> Self {
        let n = period.len();
        if n == 0 {
            return Self {
                amplitudes: Vec::new(),
            };
        }

        let mut buffer: Vec<Complex<f64>> = period.iter().map(|&x| Complex::new(x, 0.0)).collect();
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        // Single-sided amplitudes, Nyquist bin excluded
        let highest = (n - 1) / 2;
        let amplitudes = (0..=highest)
            .map(|k| {
                let scale = if k == 0 { 1.0 } else { 2.0 };
                scale * buffer[k].norm() / n as f64
            })
            .collect();

        Self { amplitudes }
    }

    /// Highest harmonic resolved by the sampling.
    pub fn highest_harmonic(&self) -> usize {
        self.amplitudes.len().saturating_sub(1)
    }

    /// Amplitude of harmonic `n` (0 when beyond resolution).
    pub fn amplitude(&self, n: usize) -> f64 {
        self.amplitudes.get(n).copied().unwrap_or(0.0)
    }

    /// THD relative to harmonic `fundamental`, including harmonics up to
    /// `max_harmonic` (capped at the resolution).
    ///
    /// `None` if the sampling does not resolve `fundamental`.
    pub fn thd(&self, fundamental: usize, max_harmonic: usize) -> Option<ThdResult> {
        if fundamental == 0 || fundamental > self.highest_harmonic() {
            return None;
        }

        let fundamental_magnitude = self.amplitude(fundamental);
        let upper = max_harmonic.max(fundamental).min(self.highest_harmonic());

        let mut sum_sq = 0.0;
        let mut num_harmonics = 0;
        for n in (1..=upper).filter(|&n| n != fundamental) {
            let a = self.amplitude(n);
            sum_sq += a * a;
            num_harmonics += 1;
        }
        let harmonic_rss = sum_sq.sqrt();

        let thd_percent = if fundamental_magnitude > MIN_FUNDAMENTAL {
            harmonic_rss / fundamental_magnitude * 100.0
        } else {
            0.0
        };

        Some(ThdResult {
            thd_percent,
            fundamental,
            fundamental_magnitude,
            harmonic_rss,
            num_harmonics,
        })
    }
}
