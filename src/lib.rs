pub mod core;

// Re-export commonly used types
pub use crate::core::errors::{Result, SimulationError};
pub use crate::core::execution::{ConcurrencyMode, SimulationConfig, SimulationEngine};
pub use crate::core::results::{
    ConfidenceInterval, Histogram, SimulationResult, SimulationSummary, DEFAULT_HISTOGRAM_BINS,
};
pub use crate::core::types::{SimulationRun, TaskSpec};
