// Backend abstraction so the viewer can be pointed at different simulation engines.

use lif_core::{Integrator, NeuronConstants, SimulationConfig, SimulationResult};

/// Anything that can produce a membrane potential trace for the viewer.
pub trait TraceBackend {
    /// Run the simulation once and hand back the full result.
    fn simulate(&self) -> lif_core::Result<SimulationResult>;
    /// Plotted x range, `(t_min, t_max)` in ms.
    fn window(&self) -> (f64, f64);
    /// Constants the run uses; the chart scales its y axis to them.
    fn constants(&self) -> NeuronConstants;
    /// Injected current per unit.
    fn input_current(&self) -> &[f64];
}

/// Implementation backed by the lif-core Euler integrator.
pub struct CoreBackend {
    integrator: Integrator,
    config: SimulationConfig,
}

impl CoreBackend {
    pub fn new(config: SimulationConfig, constants: NeuronConstants) -> Self {
        Self {
            integrator: Integrator::new(constants),
            config,
        }
    }
}

impl TraceBackend for CoreBackend {
    fn simulate(&self) -> lif_core::Result<SimulationResult> {
        self.integrator.run(&self.config)
    }

    fn window(&self) -> (f64, f64) {
        (self.config.t_min, self.config.t_max)
    }

    fn constants(&self) -> NeuronConstants {
        *self.integrator.constants()
    }

    fn input_current(&self) -> &[f64] {
        &self.config.input_current
    }
}
