// Command-line parameters: simulation window, input currents, neuron constants.

use clap::Parser;
use lif_core::{NeuronConstants, SimulationConfig};

/// Simulate a batch of leaky integrate-and-fire neurons and plot their membrane potential
#[derive(Debug, Parser)]
#[command(name = "lif-tui", author, version, about, long_about = None)]
pub struct Cli {
    /// Number of independent units
    #[arg(short = 'n', long, default_value_t = 1)]
    pub units: usize,

    /// Timestep (ms)
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    pub dt: f64,

    /// Start of the window (ms)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub t_min: f64,

    /// End of the window (ms), inclusive
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
    pub t_max: f64,

    /// Injected current per unit, comma separated; a single value applies to every unit
    #[arg(
        short = 'i',
        long,
        value_delimiter = ',',
        default_value = "1.0",
        allow_negative_numbers = true
    )]
    pub current: Vec<f64>,

    /// Leak conductance
    #[arg(long, default_value_t = NeuronConstants::default().g_l, allow_negative_numbers = true)]
    pub g_l: f64,

    /// Membrane capacitance
    #[arg(long, default_value_t = NeuronConstants::default().c_m, allow_negative_numbers = true)]
    pub c_m: f64,

    /// Resting potential (mV)
    #[arg(long, default_value_t = NeuronConstants::default().e_l, allow_negative_numbers = true)]
    pub e_l: f64,

    /// Spike threshold (mV)
    #[arg(long, default_value_t = NeuronConstants::default().v_th, allow_negative_numbers = true)]
    pub v_th: f64,

    /// Reset potential after a spike (mV)
    #[arg(long, default_value_t = NeuronConstants::default().v_reset, allow_negative_numbers = true)]
    pub v_reset: f64,

    /// Value drawn at a spike (mV)
    #[arg(long, default_value_t = NeuronConstants::default().v_peak, allow_negative_numbers = true)]
    pub v_peak: f64,

    /// Print a per-unit summary instead of opening the chart
    #[arg(long)]
    pub headless: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn simulation_config(&self) -> SimulationConfig {
        let input_current = match self.current.as_slice() {
            [single] => vec![*single; self.units],
            many => many.to_vec(),
        };
        SimulationConfig::new(self.units, self.dt, self.t_min, self.t_max, input_current)
    }

    pub fn constants(&self) -> NeuronConstants {
        NeuronConstants {
            g_l: self.g_l,
            c_m: self.c_m,
            e_l: self.e_l,
            v_th: self.v_th,
            v_reset: self.v_reset,
            v_peak: self.v_peak,
        }
    }
}
