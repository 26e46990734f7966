//! lif-core: batch simulation of leaky integrate-and-fire neurons
//!
//! A population of independent units, each driven by a constant current, is
//! integrated with fixed-step forward Euler. A unit whose potential rises
//! strictly above threshold is reset and marked with a peak value in the
//! recorded trace.
//!
//! ```
//! use lif_core::{Integrator, SimulationConfig};
//!
//! let result = Integrator::default().run(&SimulationConfig::default()).unwrap();
//! assert_eq!(result.step_count(), 10_001);
//! assert!(result.spike_count(0) > 0);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod integrator;
pub mod result;
pub mod state;

// Re-exports
pub use config::SimulationConfig;
pub use constants::NeuronConstants;
pub use error::{Result, SimulationError};
pub use integrator::{run, simulate, Integrator};
pub use result::SimulationResult;
pub use state::SimulationState;
