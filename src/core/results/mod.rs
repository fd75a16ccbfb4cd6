pub mod histogram;
pub mod stats;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::Result;

// Re-export commonly used types
pub use histogram::{Histogram, DEFAULT_HISTOGRAM_BINS};
pub use stats::{confidence_interval, mean, percentile, percentiles, ConfidenceInterval};

/// Per-iteration project totals produced by one engine run
///
/// Entry `i` of `total_costs` and `total_durations` come from the same iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    run_id: Uuid,
    seed: u64,
    total_costs: Vec<f64>,
    total_durations: Vec<f64>,
}

impl SimulationResult {
    pub(crate) fn new(
        run_id: Uuid,
        seed: u64,
        total_costs: Vec<f64>,
        total_durations: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(total_costs.len(), total_durations.len());
        Self {
            run_id,
            seed,
            total_costs,
            total_durations,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Base seed of the run; pass it to `SimulationConfig::with_seed` to replay it
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn total_costs(&self) -> &[f64] {
        &self.total_costs
    }

    pub fn total_durations(&self) -> &[f64] {
        &self.total_durations
    }

    pub fn num_simulations(&self) -> usize {
        self.total_costs.len()
    }

    /// `(cost, duration)` pairs in iteration order
    pub fn iterations(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.total_costs
            .iter()
            .copied()
            .zip(self.total_durations.iter().copied())
    }

    pub fn mean_cost(&self) -> Result<f64> {
        mean(&self.total_costs)
    }

    pub fn mean_duration(&self) -> Result<f64> {
        mean(&self.total_durations)
    }

    pub fn cost_interval(&self) -> Result<ConfidenceInterval> {
        confidence_interval(&self.total_costs)
    }

    pub fn duration_interval(&self) -> Result<ConfidenceInterval> {
        confidence_interval(&self.total_durations)
    }

    pub fn cost_histogram(&self, bins: usize) -> Result<Histogram> {
        Histogram::from_samples(&self.total_costs, bins)
    }

    pub fn duration_histogram(&self, bins: usize) -> Result<Histogram> {
        Histogram::from_samples(&self.total_durations, bins)
    }

    /// Means and 95% intervals of both marginals
    pub fn summary(&self) -> Result<SimulationSummary> {
        Ok(SimulationSummary {
            run_id: self.run_id,
            seed: self.seed,
            num_simulations: self.num_simulations(),
            mean_cost: self.mean_cost()?,
            mean_duration: self.mean_duration()?,
            cost_interval: self.cost_interval()?,
            duration_interval: self.duration_interval()?,
        })
    }
}

/// Headline statistics of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub run_id: Uuid,
    pub seed: u64,
    pub num_simulations: usize,
    pub mean_cost: f64,
    pub mean_duration: f64,
    pub cost_interval: ConfidenceInterval,
    pub duration_interval: ConfidenceInterval,
}

impl std::fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Estimated Project Cost (Mean): {:.2}", self.mean_cost)?;
        writeln!(f, "Estimated Project Duration (Mean): {:.2} days", self.mean_duration)?;
        writeln!(f, "Cost 95% Confidence Interval: {}", self.cost_interval)?;
        write!(f, "Duration 95% Confidence Interval: {}", self.duration_interval)
    }
}
