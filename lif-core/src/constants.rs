//! Membrane constants shared by every unit in a run.

use crate::error::{Result, SimulationError};

/// Fixed LIF parameters. All potentials in mV, time in ms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuronConstants {
    /// Leak conductance
    pub g_l: f64,
    /// Membrane capacitance
    pub c_m: f64,
    /// Resting (leak reversal) potential
    pub e_l: f64,
    /// Spike threshold, crossed with strict `>`
    pub v_th: f64,
    /// Potential a unit restarts from after a spike
    pub v_reset: f64,
    /// Value written into the trace at a spiking step
    pub v_peak: f64,
}

impl Default for NeuronConstants {
    fn default() -> Self {
        Self {
            g_l: 0.05,
            c_m: 1.0,
            e_l: -70.0,
            v_th: -54.0,
            v_reset: -90.0,
            v_peak: 0.0,
        }
    }
}

impl NeuronConstants {
    /// dV/dt for a unit at potential `v` receiving current `input`.
    #[inline]
    pub fn derivative(&self, v: f64, input: f64) -> f64 {
        (self.g_l * (self.e_l - v) + input) / self.c_m
    }

    /// Potential a unit settles at under constant `input` when it never spikes.
    pub fn steady_state(&self, input: f64) -> f64 {
        self.e_l + input / self.g_l
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("g_l", self.g_l),
            ("c_m", self.c_m),
            ("e_l", self.e_l),
            ("v_th", self.v_th),
            ("v_reset", self.v_reset),
            ("v_peak", self.v_peak),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimulationError::invalid(format!(
                "neuron constant {} must be finite, got {}",
                name, value
            )));
        }
        if self.c_m <= 0.0 {
            return Err(SimulationError::invalid(format!(
                "membrane capacitance must be positive, got {}",
                self.c_m
            )));
        }
        Ok(())
    }
}
