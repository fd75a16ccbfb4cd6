use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SimulationError};

/// Cost and duration distribution parameters for one project task
///
/// Both quantities are modeled as independent normal distributions.
/// A standard deviation of zero makes that quantity deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub mean_cost: f64,
    pub std_cost: f64,
    pub mean_duration: f64,
    pub std_duration: f64,
}

impl TaskSpec {
    /// Create a new task specification
    pub fn new(mean_cost: f64, std_cost: f64, mean_duration: f64, std_duration: f64) -> Self {
        Self {
            mean_cost,
            std_cost,
            mean_duration,
            std_duration,
        }
    }

    /// Create a task that always contributes exactly `cost` and `duration`
    pub fn deterministic(cost: f64, duration: f64) -> Self {
        Self::new(cost, 0.0, duration, 0.0)
    }

    /// Check that means are finite and standard deviations are finite and non-negative
    pub fn validate(&self) -> Result<()> {
        check_mean("mean_cost", self.mean_cost)?;
        check_std("std_cost", self.std_cost)?;
        check_mean("mean_duration", self.mean_duration)?;
        check_std("std_duration", self.std_duration)?;
        Ok(())
    }
}

fn check_mean(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SimulationError::invalid(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_std(name: &str, value: f64) -> Result<()> {
    // NaN fails the comparison as well
    if !(value >= 0.0) || value.is_infinite() {
        return Err(SimulationError::invalid(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Complete input of one Monte Carlo experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub tasks: Vec<TaskSpec>,
    pub num_simulations: usize,
}

impl SimulationRun {
    pub fn new(tasks: Vec<TaskSpec>, num_simulations: usize) -> Self {
        Self {
            tasks,
            num_simulations,
        }
    }

    /// Validate the simulation count and every task
    ///
    /// Errors name the offending task by its zero-based index.
    pub fn validate(&self) -> Result<()> {
        validate_inputs(&self.tasks, self.num_simulations)
    }
}

pub(crate) fn validate_inputs(tasks: &[TaskSpec], num_simulations: usize) -> Result<()> {
    if num_simulations < 1 {
        return Err(SimulationError::invalid(
            "num_simulations must be at least 1",
        ));
    }
    for (index, task) in tasks.iter().enumerate() {
        task.validate().map_err(|err| match err {
            SimulationError::InvalidParameter(msg) => {
                SimulationError::invalid(format!("task {}: {}", index, msg))
            }
            other => other,
        })?;
    }
    Ok(())
}
