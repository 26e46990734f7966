// Application state for the viewer: the finished run plus chart-ready series.

use lif_core::SimulationResult;

use crate::backend::TraceBackend;

/// Padding added around the y range so spike markers don't touch the frame (mV).
const Y_MARGIN: f64 = 5.0;

pub struct App<B: TraceBackend> {
    pub backend: B,
    pub result: SimulationResult,
    pub series: Vec<Vec<(f64, f64)>>, // [unit][point]
    pub y_bounds: [f64; 2],
    pub quit: bool,
}

impl<B: TraceBackend> App<B> {
    /// Runs the backend once and prepares at most `max_points` points per unit.
    pub fn new(backend: B, max_points: usize) -> lif_core::Result<Self> {
        let result = backend.simulate()?;
        let time = result.time_axis().to_vec();
        let series: Vec<Vec<(f64, f64)>> = result
            .potential_trace()
            .rows()
            .into_iter()
            .map(|row| {
                let values: Vec<f64> = row.iter().copied().collect();
                decimate(&time, &values, max_points)
            })
            .collect();

        let c = backend.constants();
        let (lo, hi) = result
            .potential_trace()
            .iter()
            .fold((c.v_reset.min(c.v_peak), c.v_reset.max(c.v_peak)), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        Ok(Self {
            backend,
            result,
            series,
            y_bounds: [lo - Y_MARGIN, hi + Y_MARGIN],
            quit: false,
        })
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let (t_min, t_max) = self.backend.window();
        [t_min, t_max]
    }

    /// One line per unit: spike count, mean rate, the potential the unit
    /// would settle at without spiking, and first spike time.
    pub fn summary_lines(&self) -> Vec<String> {
        let constants = self.backend.constants();
        let currents = self.backend.input_current();
        (0..self.result.unit_count())
            .map(|unit| {
                let steady = currents
                    .get(unit)
                    .map_or_else(
                        || "-".to_string(),
                        |&i| format!("{:.1} mV", constants.steady_state(i)),
                    );
                let first = self
                    .result
                    .spike_times_ms(unit)
                    .first()
                    .map_or_else(|| "-".to_string(), |t| format!("{:.1} ms", t));
                format!(
                    "unit {:>2}: {} spikes, {:.2} Hz, steady state {}, first spike {}",
                    unit,
                    self.result.spike_count(unit),
                    self.result.firing_rate_hz(unit),
                    steady,
                    first
                )
            })
            .collect()
    }
}

/// Reduces a trace to roughly `max_points` points by keeping the minimum and
/// maximum of each bucket in time order, so one-sample spike markers survive.
pub fn decimate(time: &[f64], values: &[f64], max_points: usize) -> Vec<(f64, f64)> {
    let n = time.len().min(values.len());
    if n <= max_points || max_points < 2 {
        return time.iter().copied().zip(values.iter().copied()).take(n).collect();
    }

    let buckets = max_points / 2;
    let bucket_len = (n + buckets - 1) / buckets;
    let mut out = Vec::with_capacity(buckets * 2);
    for start in (0..n).step_by(bucket_len) {
        let end = (start + bucket_len).min(n);
        let mut min_i = start;
        let mut max_i = start;
        for i in start..end {
            if values[i] < values[min_i] {
                min_i = i;
            }
            if values[i] > values[max_i] {
                max_i = i;
            }
        }
        let (a, b) = if min_i <= max_i { (min_i, max_i) } else { (max_i, min_i) };
        out.push((time[a], values[a]));
        if b != a {
            out.push((time[b], values[b]));
        }
    }
    out
}
