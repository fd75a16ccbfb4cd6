use thiserror::Error;

/// Errors returned by the simulation engine and its statistics helpers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Simulation cancelled after {completed} iterations")]
    Cancelled { completed: usize },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

impl SimulationError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimulationError::InvalidParameter(msg.into())
    }
}
