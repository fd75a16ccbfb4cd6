use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use uuid::Uuid;

use crate::core::errors::{Result, SimulationError};
use crate::core::execution::config::{ConcurrencyMode, SimulationConfig};
use crate::core::results::SimulationResult;
use crate::core::types::{validate_inputs, SimulationRun, TaskSpec};

/// Pre-built cost and duration distributions for one task
#[derive(Debug, Clone, Copy)]
struct TaskSampler {
    cost: Normal<f64>,
    duration: Normal<f64>,
}

impl TaskSampler {
    fn from_spec(index: usize, task: &TaskSpec) -> Result<Self> {
        let cost = Normal::new(task.mean_cost, task.std_cost)
            .map_err(|e| SimulationError::invalid(format!("task {}: cost: {}", index, e)))?;
        let duration = Normal::new(task.mean_duration, task.std_duration)
            .map_err(|e| SimulationError::invalid(format!("task {}: duration: {}", index, e)))?;
        Ok(Self { cost, duration })
    }
}

/// Monte Carlo engine estimating total project cost and duration
///
/// Each iteration draws one cost and one duration sample per task and sums them.
/// Iteration `i` owns a `StdRng` seeded from a SplitMix64 mix of the run seed and `i`,
/// so results do not depend on the concurrency mode or on how rayon splits the work,
/// and runs with neighbouring seeds share no streams.
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run `num_simulations` iterations over `tasks`
    ///
    /// Fails with `InvalidParameter` before any sampling if `num_simulations` is zero
    /// or a task has a negative or non-finite parameter. An empty task list is valid
    /// and yields all-zero totals.
    pub fn run(&self, tasks: &[TaskSpec], num_simulations: usize) -> Result<SimulationResult> {
        self.execute(tasks, num_simulations, None)
    }

    /// Run a prepared `SimulationRun`
    pub fn run_simulation(&self, run: &SimulationRun) -> Result<SimulationResult> {
        self.execute(&run.tasks, run.num_simulations, None)
    }

    /// Like `run`, but checks `cancel` before every iteration
    ///
    /// Raising the flag aborts the run with `Cancelled`; no partial result is returned.
    pub fn run_with_cancel(
        &self,
        tasks: &[TaskSpec],
        num_simulations: usize,
        cancel: &AtomicBool,
    ) -> Result<SimulationResult> {
        self.execute(tasks, num_simulations, Some(cancel))
    }

    fn execute(
        &self,
        tasks: &[TaskSpec],
        num_simulations: usize,
        cancel: Option<&AtomicBool>,
    ) -> Result<SimulationResult> {
        validate_inputs(tasks, num_simulations)?;
        let samplers = tasks
            .iter()
            .enumerate()
            .map(|(index, task)| TaskSampler::from_spec(index, task))
            .collect::<Result<Vec<_>>>()?;
        debug!("Validated {} tasks for {} simulations", samplers.len(), num_simulations);

        let seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let run_id = Uuid::new_v4();
        info!(
            "[Run {}] Starting {} simulations over {} tasks ({:?}, seed {})",
            run_id,
            num_simulations,
            tasks.len(),
            self.config.concurrency_mode,
            seed
        );

        let totals = match self.config.concurrency_mode {
            ConcurrencyMode::Sequential => {
                run_sequential(&samplers, seed, num_simulations, cancel)?
            }
            ConcurrencyMode::Rayon => match self.config.thread_pool_size {
                Some(size) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(size)
                        .build()
                        .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;
                    debug!("[Run {}] Using dedicated pool of {} threads", run_id, size);
                    pool.install(|| run_parallel(&samplers, seed, num_simulations, cancel))?
                }
                None => run_parallel(&samplers, seed, num_simulations, cancel)?,
            },
        };

        let (total_costs, total_durations): (Vec<f64>, Vec<f64>) = totals.into_iter().unzip();
        info!("[Run {}] Completed {} simulations", run_id, total_costs.len());

        Ok(SimulationResult::new(run_id, seed, total_costs, total_durations))
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

/// SplitMix64 finalizer
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Seed of the stream owned by `iteration` within the run seeded with `seed`
fn iteration_seed(seed: u64, iteration: usize) -> u64 {
    mix64(mix64(seed) ^ iteration as u64)
}

/// Draw one iteration: per task in order, cost then duration
fn simulate_iteration(samplers: &[TaskSampler], seed: u64, iteration: usize) -> (f64, f64) {
    let mut rng = StdRng::seed_from_u64(iteration_seed(seed, iteration));
    let mut total_cost = 0.0;
    let mut total_duration = 0.0;
    for sampler in samplers {
        total_cost += sampler.cost.sample(&mut rng);
        total_duration += sampler.duration.sample(&mut rng);
    }
    (total_cost, total_duration)
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.map_or(false, |flag| flag.load(Ordering::Relaxed))
}

fn run_sequential(
    samplers: &[TaskSampler],
    seed: u64,
    num_simulations: usize,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<(f64, f64)>> {
    let mut totals = Vec::with_capacity(num_simulations);
    for iteration in 0..num_simulations {
        if is_cancelled(cancel) {
            return Err(SimulationError::Cancelled {
                completed: iteration,
            });
        }
        totals.push(simulate_iteration(samplers, seed, iteration));
    }
    Ok(totals)
}

fn run_parallel(
    samplers: &[TaskSampler],
    seed: u64,
    num_simulations: usize,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<(f64, f64)>> {
    let completed = AtomicUsize::new(0);
    let totals = (0..num_simulations)
        .into_par_iter()
        .map(|iteration| {
            if is_cancelled(cancel) {
                return Err(());
            }
            let totals = simulate_iteration(samplers, seed, iteration);
            completed.fetch_add(1, Ordering::Relaxed);
            Ok(totals)
        })
        .collect::<std::result::Result<Vec<_>, ()>>();

    totals.map_err(|_| SimulationError::Cancelled {
        completed: completed.load(Ordering::Relaxed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_reproducible() {
        let task = TaskSpec::new(10.0, 1.0, 5.0, 0.5);
        let samplers = vec![TaskSampler::from_spec(0, &task).unwrap()];
        assert_eq!(
            simulate_iteration(&samplers, 7, 3),
            simulate_iteration(&samplers, 7, 3)
        );
        assert_ne!(
            simulate_iteration(&samplers, 7, 3),
            simulate_iteration(&samplers, 7, 4)
        );
    }

    #[test]
    fn test_iteration_seeds_do_not_collide_across_runs() {
        let mut seeds = std::collections::HashSet::new();
        for seed in 0..32u64 {
            for iteration in 0..512 {
                assert!(seeds.insert(iteration_seed(seed, iteration)));
            }
        }
    }

    #[test]
    fn test_iteration_without_tasks_is_zero() {
        assert_eq!(simulate_iteration(&[], 1, 0), (0.0, 0.0));
    }

    #[test]
    fn test_sequential_cancel_reports_progress() {
        let cancel = AtomicBool::new(true);
        let result = run_sequential(&[], 0, 10, Some(&cancel));
        assert_eq!(result, Err(SimulationError::Cancelled { completed: 0 }));
    }
}
