//! Circuit description and validation.
//!
//! This module provides the [`CircuitConfiguration`] consumed by every other
//! part of the engine, together with the closed [`Topology`] enumeration and
//! the validation rules applied before any computation.

mod config;
mod types;
mod validate;

pub use config::CircuitConfiguration;
pub use types::*;
pub use validate::validate_configuration;
