//! Run configuration: population size, time grid and injected currents.

use ndarray::Array1;

use crate::error::{Result, SimulationError};

/// Relative distance from an integer within which `(t_max - t_min) / dt` is
/// treated as that integer, so e.g. 1000 / 0.1 yields 10000 steps.
const STEP_SNAP_TOLERANCE: f64 = 1e-9;

/// Largest trace (units x time points) a run may allocate; ndarray caps an
/// array's byte size at `isize::MAX`.
const MAX_TRACE_CELLS: usize = isize::MAX as usize / core::mem::size_of::<f64>();

/// Inputs of a single run. Immutable once handed to the integrator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub unit_count: usize,
    /// Timestep (ms)
    pub dt: f64,
    /// First time point (ms)
    pub t_min: f64,
    /// Last time point (ms), inclusive
    pub t_max: f64,
    /// One constant current per unit
    pub input_current: Vec<f64>,
}

impl Default for SimulationConfig {
    /// One unit driven by I = 1.0 for 1000 ms at dt = 0.1 ms.
    fn default() -> Self {
        Self::uniform(1, 0.1, 0.0, 1000.0, 1.0)
    }
}

impl SimulationConfig {
    pub fn new(unit_count: usize, dt: f64, t_min: f64, t_max: f64, input_current: Vec<f64>) -> Self {
        Self { unit_count, dt, t_min, t_max, input_current }
    }

    /// Every unit receives the same `current`.
    pub fn uniform(unit_count: usize, dt: f64, t_min: f64, t_max: f64, current: f64) -> Self {
        Self::new(unit_count, dt, t_min, t_max, vec![current; unit_count])
    }

    /// Checks the integrator's input contract.
    pub fn validate(&self) -> Result<()> {
        if self.unit_count == 0 {
            return Err(SimulationError::invalid("unit count must be at least 1"));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimulationError::invalid(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if !self.t_min.is_finite() || !self.t_max.is_finite() {
            return Err(SimulationError::invalid(format!(
                "time bounds must be finite, got [{}, {}]",
                self.t_min, self.t_max
            )));
        }
        if self.t_max < self.t_min {
            return Err(SimulationError::invalid(format!(
                "t_max ({}) is before t_min ({})",
                self.t_max, self.t_min
            )));
        }
        if self.input_current.len() != self.unit_count {
            return Err(SimulationError::invalid(format!(
                "expected {} input currents, got {}",
                self.unit_count,
                self.input_current.len()
            )));
        }
        if let Some((unit, value)) = self
            .input_current
            .iter()
            .enumerate()
            .find(|(_, i)| !i.is_finite())
        {
            return Err(SimulationError::invalid(format!(
                "input current for unit {} must be finite, got {}",
                unit, value
            )));
        }
        let cells = (self.whole_steps() + 1.0) * self.unit_count as f64;
        if !(cells <= MAX_TRACE_CELLS as f64) {
            return Err(SimulationError::invalid(format!(
                "{} units over [{}, {}] at dt = {} exceed the trace limit of {} samples",
                self.unit_count, self.t_min, self.t_max, self.dt, MAX_TRACE_CELLS
            )));
        }
        Ok(())
    }

    /// Full dt steps between the bounds, snapped to an integer when the
    /// quotient is within rounding error of one.
    fn whole_steps(&self) -> f64 {
        let span = (self.t_max - self.t_min) / self.dt;
        let nearest = span.round();
        if (span - nearest).abs() <= STEP_SNAP_TOLERANCE * nearest.abs().max(1.0) {
            nearest
        } else {
            span.floor()
        }
    }

    /// Number of time points T, both bounds included. Assumes a valid config.
    pub fn step_count(&self) -> usize {
        (self.whole_steps() as usize).saturating_add(1)
    }

    /// `t_min + k * dt` for every step k.
    pub fn time_axis(&self) -> Array1<f64> {
        let (t_min, dt) = (self.t_min, self.dt);
        Array1::from_shape_fn(self.step_count(), |k| t_min + k as f64 * dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_example_is_valid() {
        let cfg = SimulationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.unit_count, 1);
        assert_eq!(cfg.input_current, vec![1.0]);
        assert_eq!(cfg.step_count(), 10_001);
    }

    #[test]
    fn time_axis_spans_both_bounds() {
        let cfg = SimulationConfig::uniform(2, 0.5, 10.0, 12.0, 0.0);
        let t = cfg.time_axis();
        assert_eq!(t.len(), 5);
        assert_relative_eq!(t[0], 10.0);
        assert_relative_eq!(t[4], 12.0);
    }

    #[test]
    fn step_count_floors_partial_steps() {
        let cfg = SimulationConfig::uniform(1, 0.3, 0.0, 1.0, 0.0);
        // 1.0 / 0.3 = 3.33.. -> 3 full steps plus the starting point
        assert_eq!(cfg.step_count(), 4);
    }

    #[test]
    fn degenerate_window_has_one_point() {
        let cfg = SimulationConfig::uniform(1, 0.1, 5.0, 5.0, 1.0);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.step_count(), 1);
        assert_eq!(cfg.time_axis().to_vec(), vec![5.0]);
    }

    #[test]
    fn rejects_grids_too_large_to_store() {
        let tiny_dt = SimulationConfig::uniform(1, 1e-300, 0.0, 1.0, 1.0);
        assert!(matches!(
            tiny_dt.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        let wide = SimulationConfig::uniform(1 << 20, 1e-3, 0.0, 1e12, 0.0);
        assert!(matches!(
            wide.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        // Step count itself never overflows, even unvalidated
        assert_eq!(tiny_dt.step_count(), usize::MAX);
    }

    #[test]
    fn rejects_contract_violations() {
        let bad = [
            SimulationConfig::uniform(0, 0.1, 0.0, 1.0, 1.0),
            SimulationConfig::uniform(1, 0.0, 0.0, 1.0, 1.0),
            SimulationConfig::uniform(1, -0.1, 0.0, 1.0, 1.0),
            SimulationConfig::uniform(1, f64::NAN, 0.0, 1.0, 1.0),
            SimulationConfig::uniform(1, 0.1, 1.0, 0.0, 1.0),
            SimulationConfig::uniform(1, 0.1, 0.0, f64::INFINITY, 1.0),
            SimulationConfig::new(2, 0.1, 0.0, 1.0, vec![1.0]),
            SimulationConfig::new(1, 0.1, 0.0, 1.0, vec![f64::NAN]),
        ];
        for cfg in bad.iter() {
            assert!(
                matches!(cfg.validate(), Err(SimulationError::InvalidConfiguration(_))),
                "accepted {:?}",
                cfg
            );
        }
    }
}
