//! Fixed-step Euler integrator with threshold-reset spiking.
//!
//! Per step s:
//! 1. every unit takes one forward-Euler step of `dV = (gL (eL - V) + I) / Cm`
//! 2. the integrated potentials are written into column s of the trace
//! 3. units with `V > vTh` get `vPeak` written over their entry in column s,
//!    are reset to `vReset` for step s+1, and record s as a spike time

use ndarray::{Array1, Array2};
use tracing::{debug, trace, warn};

use crate::config::SimulationConfig;
use crate::constants::NeuronConstants;
use crate::error::Result;
use crate::result::SimulationResult;
use crate::state::SimulationState;

/// Owns the constants and runs independent simulations with them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Integrator {
    constants: NeuronConstants,
}

impl Integrator {
    pub fn new(constants: NeuronConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &NeuronConstants {
        &self.constants
    }

    /// Runs the whole window in one pass. Fails only on invalid input, and
    /// then before any state is created.
    pub fn run(&self, config: &SimulationConfig) -> Result<SimulationResult> {
        if let Err(err) = self.constants.validate().and_then(|_| config.validate()) {
            warn!(error = %err, "rejecting simulation run");
            return Err(err);
        }

        let constants = &self.constants;
        let time_axis = config.time_axis();
        let steps = time_axis.len();
        let units = config.unit_count;
        debug!(units, steps, dt = config.dt, "starting LIF run");

        let input = Array1::from(config.input_current.clone());
        let mut state = SimulationState::new(units, constants);
        let mut potential_trace = Array2::<f64>::zeros((units, steps));
        let mut spike_times: Vec<Vec<usize>> = vec![Vec::new(); units];

        for s in 0..steps {
            state.integrate(config.dt, &input, constants);
            potential_trace.column_mut(s).assign(&state.potential);

            for unit in state.detect_and_reset(s, constants) {
                potential_trace[[unit, s]] = constants.v_peak;
                spike_times[unit].push(s);
                trace!(unit, step = s, "spike");
            }
        }

        let result = SimulationResult::new(time_axis, potential_trace, spike_times, config.dt);
        debug!(total_spikes = result.total_spikes(), "LIF run complete");
        Ok(result)
    }
}

/// Runs `config` with `constants`.
pub fn run(config: &SimulationConfig, constants: &NeuronConstants) -> Result<SimulationResult> {
    Integrator::new(*constants).run(config)
}

/// Runs with default constants and returns only `(time_axis, potential_trace)`.
pub fn simulate(
    unit_count: usize,
    dt: f64,
    t_min: f64,
    t_max: f64,
    input_current: &[f64],
) -> Result<(Array1<f64>, Array2<f64>)> {
    let config = SimulationConfig::new(unit_count, dt, t_min, t_max, input_current.to_vec());
    Integrator::default().run(&config).map(SimulationResult::into_parts)
}
