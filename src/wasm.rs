//! WASM bindings for Rectifier Core.
//!
//! This module provides JavaScript-friendly bindings so a browser front end
//! can drive the engine from sliders and plot the returned arrays.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmRectifierSim } from 'rectifier_core';
//!
//! await init();
//!
//! const sim = new WasmRectifierSim("half-wave-controlled", 325, 50, 45, 10, 0.05, 2, 1000);
//! plot(sim.times(), sim.voltages());
//! console.log(sim.average_voltage, sim.thd_percent);
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{CircuitConfiguration, Topology};
use crate::solver::{SimulationResult, Simulator, SimulatorConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// One computed rectifier operating point.
///
/// Every slider change should construct a new instance; nothing is shared
/// between instances.
#[wasm_bindgen]
pub struct WasmRectifierSim {
    result: SimulationResult,
}

#[wasm_bindgen]
impl WasmRectifierSim {
    /// Compute a rectifier operating point.
    ///
    /// # Arguments
    /// * `topology` - Kebab-case topology name, e.g. `"three-phase-controlled"`
    /// * `amplitude` - Peak supply voltage in volts
    /// * `frequency` - Supply frequency in Hz
    /// * `firing_angle` - Firing angle in degrees, `undefined` for uncontrolled topologies
    /// * `resistance` - Load resistance in ohms
    /// * `inductance` - Load inductance in henries
    /// * `cycles` - Supply periods to sample
    /// * `samples_per_cycle` - Samples per period
    ///
    /// # Returns
    /// A new `WasmRectifierSim` or an error message naming the offending field.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topology: &str,
        amplitude: f64,
        frequency: f64,
        firing_angle: Option<f64>,
        resistance: f64,
        inductance: f64,
        cycles: usize,
        samples_per_cycle: usize,
    ) -> Result<WasmRectifierSim, JsValue> {
        let topology: Topology = topology
            .parse()
            .map_err(|e: crate::RectifierError| JsValue::from_str(&e.to_string()))?;

        let mut circuit = CircuitConfiguration::new(topology, amplitude, frequency, resistance)
            .with_inductance(inductance)
            .with_cycles(cycles)
            .with_samples_per_cycle(samples_per_cycle);
        circuit.firing_angle_degrees = firing_angle;

        let result = Simulator::with_config(SimulatorConfig::new())
            .run(&circuit)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmRectifierSim { result })
    }

    /// Sample times in seconds.
    #[wasm_bindgen]
    pub fn times(&self) -> Vec<f64> {
        self.result.waveform.times()
    }

    /// Output voltage samples.
    #[wasm_bindgen]
    pub fn voltages(&self) -> Vec<f64> {
        self.result.waveform.voltages()
    }

    /// Load current samples.
    #[wasm_bindgen]
    pub fn currents(&self) -> Vec<f64> {
        self.result.waveform.currents()
    }

    /// Supply phase `phase` (0 = a) at every sample, empty if out of range.
    #[wasm_bindgen]
    pub fn supply(&self, phase: usize) -> Vec<f64> {
        self.result
            .waveform
            .supply_phase(phase)
            .map(<[f64]>::to_vec)
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter)]
    pub fn average_voltage(&self) -> f64 {
        self.result.metrics.average_voltage
    }

    #[wasm_bindgen(getter)]
    pub fn rms_voltage(&self) -> f64 {
        self.result.metrics.rms_voltage
    }

    #[wasm_bindgen(getter)]
    pub fn form_factor(&self) -> f64 {
        self.result.metrics.form_factor
    }

    #[wasm_bindgen(getter)]
    pub fn ripple_factor(&self) -> f64 {
        self.result.metrics.ripple_factor
    }

    #[wasm_bindgen(getter)]
    pub fn rectification_efficiency(&self) -> f64 {
        self.result.metrics.rectification_efficiency
    }

    /// Voltage THD in percent, `undefined` if the resolution is too coarse.
    #[wasm_bindgen(getter)]
    pub fn thd_percent(&self) -> Option<f64> {
        self.result.metrics.thd_percent
    }

    #[wasm_bindgen(getter)]
    pub fn peak_inverse_voltage(&self) -> f64 {
        self.result.metrics.peak_inverse_voltage
    }

    /// Whether every metric came from analytic integrals.
    #[wasm_bindgen(getter)]
    pub fn closed_form(&self) -> bool {
        self.result.is_closed_form()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
