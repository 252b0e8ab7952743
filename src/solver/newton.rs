//! Newton-Raphson iteration for the extinction angle.

use std::f64::consts::PI;

use log::trace;

use super::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, MIN_CONDUCTION_WIDTH, SCAN_STEP};
use crate::error::{RectifierError, Result};

/// Extinction angle solver for R-L loads.
///
/// Angles are source angles in radians: `alpha` is where the current starts
/// from zero and `phi = atan(ωL/R)` is the load angle.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtinctionSolver {
    /// Maximum Newton iterations after bracketing
    pub max_iterations: usize,
    /// Convergence tolerance on the step size (radians)
    pub tolerance: f64,
}

impl Default for ExtinctionSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtinctionSolver {
    /// Create a solver with the default iteration cap and tolerance.
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Create a solver with custom settings.
    pub fn with_config(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Normalised zero-start current `i(θ)·Z/Vm`.
    pub fn residual(alpha: f64, phi: f64, theta: f64) -> f64 {
        let tau = phi.tan();
        (theta - phi).sin() - (alpha - phi).sin() * (-(theta - alpha) / tau).exp()
    }

    /// Derivative of [`Self::residual`] with respect to θ.
    fn slope(alpha: f64, phi: f64, theta: f64) -> f64 {
        let tau = phi.tan();
        (theta - phi).cos() + (alpha - phi).sin() / tau * (-(theta - alpha) / tau).exp()
    }

    /// Solve for the extinction angle β of a pulse fired at `alpha`.
    ///
    /// A pulse always dies out within one period of a passive R-L load, so
    /// failing to find β before `alpha + 2π` is reported as non-convergence.
    pub fn solve(&self, alpha: f64, phi: f64) -> Result<f64> {
        let limit = alpha + 2.0 * PI;
        self.solve_within(alpha, phi, limit)?.ok_or_else(|| {
            RectifierError::convergence_failure(0, Self::residual(alpha, phi, limit).abs())
        })
    }

    /// Solve for β, or `None` if the current is still flowing at `limit`.
    ///
    /// `None` means the next pulse fires before this one dies out, i.e. the
    /// conduction is continuous.
    pub fn solve_within(&self, alpha: f64, phi: f64, limit: f64) -> Result<Option<f64>> {
        // Source already negative or zero at firing: nothing conducts
        if alpha >= PI - MIN_CONDUCTION_WIDTH {
            return Ok(Some(alpha));
        }

        // Purely resistive: current follows the voltage to its zero crossing
        if phi <= 0.0 {
            return Ok(if PI < limit { Some(PI) } else { None });
        }

        // The current cannot reach zero while the source is still positive,
        // so the search starts at π.
        let mut lo = PI;
        if Self::residual(alpha, phi, lo) <= 0.0 {
            return Ok(Some(lo));
        }

        let mut hi = lo;
        loop {
            hi = (hi + SCAN_STEP).min(limit);
            if Self::residual(alpha, phi, hi) <= 0.0 {
                break;
            }
            if hi >= limit {
                trace!("extinction: current still flowing at limit {:.6} rad", limit);
                return Ok(None);
            }
            lo = hi;
        }

        self.refine(alpha, phi, lo, hi).map(Some)
    }

    /// Safeguarded Newton-Raphson on a bracket with `f(lo) > 0 >= f(hi)`.
    ///
    /// Converged once both the step and the residual are below the
    /// tolerance, or the bracket has shrunk to rounding error.
    fn refine(&self, alpha: f64, phi: f64, mut lo: f64, mut hi: f64) -> Result<f64> {
        let mut x = 0.5 * (lo + hi);
        let mut fx = Self::residual(alpha, phi, x);

        for iter in 0..self.max_iterations {
            if fx > 0.0 {
                lo = x;
            } else {
                hi = x;
            }

            let dfx = Self::slope(alpha, phi, x);
            let newton = x - fx / dfx;
            // Fall back to bisection when Newton leaves the bracket
            let next = if dfx != 0.0 && newton > lo && newton < hi {
                newton
            } else {
                0.5 * (lo + hi)
            };

            let step = (next - x).abs();
            x = next;
            fx = Self::residual(alpha, phi, x);

            // A short bisection step alone says nothing about the residual
            let collapsed = hi - lo <= f64::EPSILON * x.abs();
            if (step < self.tolerance && fx.abs() < self.tolerance) || collapsed {
                trace!(
                    "extinction: beta = {:.9} rad, residual {:.2e} after {} iterations",
                    x,
                    fx,
                    iter + 1
                );
                return Ok(x);
            }
        }

        Err(RectifierError::convergence_failure(
            self.max_iterations,
            fx.abs(),
        ))
    }
}

/// Solve `sin(β − φ) = sin(α − φ)·e^{−(β−α)/tan φ}` for the first β after α.
///
/// Uses the default iteration cap and tolerance.
pub fn solve_extinction_angle(alpha: f64, phi: f64) -> Result<f64> {
    ExtinctionSolver::new().solve(alpha, phi)
}
