//! Errors reported by the simulation entry points.

use thiserror::Error;

/// The only way a run can fail: the inputs break the integrator's contract.
///
/// Raised before any simulation state exists, so a failed run leaves nothing
/// behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl SimulationError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimulationError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T, E = SimulationError> = core::result::Result<T, E>;
