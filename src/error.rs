//! Error types for the rectifier engine.
//!
//! This module provides a unified error type [`RectifierError`] that covers
//! all error conditions that can occur during configuration validation,
//! conduction analysis, and metric evaluation.

use thiserror::Error;

/// Result type alias using [`RectifierError`].
pub type Result<T> = std::result::Result<T, RectifierError>;

/// Unified error type for all rectifier computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RectifierError {
    // ============ Configuration Errors ============
    /// A configuration field violates its constraint
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfiguration { field: String, message: String },

    /// Topology name could not be recognised
    #[error("Unknown topology '{name}' (expected one of: half-wave-uncontrolled, full-wave-uncontrolled, half-wave-controlled, full-wave-controlled, three-phase-uncontrolled, three-phase-controlled)")]
    UnknownTopology { name: String },

    // ============ Computation Errors ============
    /// The output collapses to (nearly) zero, so ratio metrics are undefined
    #[error("Degenerate result: {message}")]
    DegenerateResult { message: String },

    /// Extinction-angle iteration did not converge
    #[error("Extinction angle did not converge after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailure { iterations: usize, residual: f64 },

    // ============ I/O Errors ============
    /// Error writing samples or metrics
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl RectifierError {
    /// Create an invalid configuration error
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a degenerate result error
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateResult {
            message: message.into(),
        }
    }

    /// Create a convergence failure error
    pub fn convergence_failure(iterations: usize, residual: f64) -> Self {
        Self::ConvergenceFailure {
            iterations,
            residual,
        }
    }

    /// Name of the offending configuration field, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidConfiguration { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message_names_field() {
        let err = RectifierError::invalid("load_resistance", "must be positive");
        assert_eq!(err.field(), Some("load_resistance"));
        assert_eq!(
            err.to_string(),
            "Invalid configuration field 'load_resistance': must be positive"
        );
    }

    #[test]
    fn test_convergence_message() {
        let err = RectifierError::convergence_failure(50, 1.5e-3);
        assert!(err.to_string().contains("50 iterations"));
        assert!(err.field().is_none());
    }
}
