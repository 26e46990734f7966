//! Mutable per-run state: one membrane potential per unit.

use ndarray::{Array1, Zip};

use crate::constants::NeuronConstants;

/// Lives for exactly one run and is dropped once the result is filled in.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub potential: Array1<f64>,
    /// Most recent spiking step per unit, `None` until the first spike.
    pub last_spike_time: Vec<Option<usize>>,
}

impl SimulationState {
    /// Every unit starts at rest.
    pub fn new(unit_count: usize, constants: &NeuronConstants) -> Self {
        Self {
            potential: Array1::from_elem(unit_count, constants.e_l),
            last_spike_time: vec![None; unit_count],
        }
    }

    /// Forward Euler: `V <- V + dt * (gL (eL - V) + I) / Cm` for every unit.
    pub fn integrate(&mut self, dt: f64, input: &Array1<f64>, constants: &NeuronConstants) {
        Zip::from(&mut self.potential)
            .and(input)
            .for_each(|v, &i| *v += constants.derivative(*v, i) * dt);
    }

    /// Resets every unit above threshold and returns their indices in
    /// ascending order. Units are independent, so order has no effect on
    /// the dynamics.
    pub fn detect_and_reset(&mut self, step: usize, constants: &NeuronConstants) -> Vec<usize> {
        let mut spikers = Vec::new();
        for (unit, v) in self.potential.iter_mut().enumerate() {
            if *v > constants.v_th {
                *v = constants.v_reset;
                self.last_spike_time[unit] = Some(step);
                spikers.push(unit);
            }
        }
        spikers
    }
}
