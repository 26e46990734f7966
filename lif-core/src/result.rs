//! Output of a completed run.

use ndarray::{Array1, Array2, ArrayView1};

/// Time axis, dense potential trace and spike history of one run.
///
/// `potential_trace` is laid out unit x time. At a spiking step the trace
/// holds `v_peak` rather than the integrated potential, which makes each
/// spike a one-sample upward marker when plotted.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    time_axis: Array1<f64>,
    potential_trace: Array2<f64>,
    spike_times: Vec<Vec<usize>>,
    dt: f64,
}

impl SimulationResult {
    pub(crate) fn new(
        time_axis: Array1<f64>,
        potential_trace: Array2<f64>,
        spike_times: Vec<Vec<usize>>,
        dt: f64,
    ) -> Self {
        debug_assert_eq!(potential_trace.ncols(), time_axis.len());
        debug_assert_eq!(potential_trace.nrows(), spike_times.len());
        Self { time_axis, potential_trace, spike_times, dt }
    }

    /// Time points (ms).
    pub fn time_axis(&self) -> &Array1<f64> {
        &self.time_axis
    }

    /// Recorded potentials (mV), one row per unit.
    pub fn potential_trace(&self) -> &Array2<f64> {
        &self.potential_trace
    }

    /// Step indices (columns of the trace) at which each unit spiked, ascending.
    pub fn spike_times(&self) -> &[Vec<usize>] {
        &self.spike_times
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn unit_count(&self) -> usize {
        self.potential_trace.nrows()
    }

    pub fn step_count(&self) -> usize {
        self.time_axis.len()
    }

    /// Panics if `unit` is out of range.
    pub fn unit_trace(&self, unit: usize) -> ArrayView1<'_, f64> {
        self.potential_trace.row(unit)
    }

    pub fn spike_count(&self, unit: usize) -> usize {
        self.spike_times.get(unit).map_or(0, Vec::len)
    }

    pub fn total_spikes(&self) -> usize {
        self.spike_times.iter().map(Vec::len).sum()
    }

    /// Spike times of `unit` converted to ms on the time axis.
    pub fn spike_times_ms(&self, unit: usize) -> Vec<f64> {
        self.spike_times
            .get(unit)
            .map(|steps| steps.iter().map(|&s| self.time_axis[s]).collect())
            .unwrap_or_default()
    }

    /// Mean firing rate (Hz) over the integrated duration `T * dt`.
    pub fn firing_rate_hz(&self, unit: usize) -> f64 {
        let duration_ms = self.step_count() as f64 * self.dt;
        1000.0 * self.spike_count(unit) as f64 / duration_ms
    }

    /// `(time_axis, potential_trace)`, the pair a plotting front end needs.
    pub fn into_parts(self) -> (Array1<f64>, Array2<f64>) {
        (self.time_axis, self.potential_trace)
    }
}
