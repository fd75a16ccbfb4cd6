//! Configuration for Monte Carlo execution
//!
//! This module provides configuration types for controlling how simulation
//! iterations are scheduled and how their random streams are seeded.

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyMode {
    /// Sequential execution mode - iterations run in order within a single thread
    #[default]
    Sequential,
    /// Parallel execution mode using Rayon - iterations are spread across worker threads
    Rayon,
}

/// Configuration for simulation execution
///
/// This struct holds configuration options that control how the simulation is executed,
/// including concurrency settings and the base seed of the random streams.
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    /// The concurrency mode to use for execution
    pub concurrency_mode: ConcurrencyMode,
    /// The size of a dedicated thread pool for parallel execution
    /// Only relevant when concurrency_mode is Rayon; None uses the global pool
    pub thread_pool_size: Option<usize>,
    /// Base seed for the per-iteration random streams
    /// None draws a fresh seed from OS entropy on every run
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Create a new simulation configuration with default values
    ///
    /// Default configuration uses Sequential mode, no dedicated pool and an entropy seed
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency mode for the simulation
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel execution
    ///
    /// # Note
    /// This setting only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    /// Fix the base seed so repeated runs produce identical output
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
