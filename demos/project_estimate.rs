use std::env;
use std::fs;

use projsim::{
    ConcurrencyMode, Histogram, SimulationConfig, SimulationEngine, TaskSpec,
    DEFAULT_HISTOGRAM_BINS,
};

const DEFAULT_TASK_COUNT: usize = 3;
const DEFAULT_SIMULATIONS: usize = 1000;
const MIN_SIMULATIONS: usize = 100;
const MAX_SIMULATIONS: usize = 5000;
const BAR_WIDTH: usize = 50;

/// Usage: project_estimate [TASKS_JSON] [NUM_SIMULATIONS] [SEED]
///
/// TASKS_JSON holds an array of objects with mean_cost, std_cost,
/// mean_duration and std_duration. Pass "-" to keep the default tasks.
fn main() -> Result<(), String> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let tasks = match args.first().map(String::as_str) {
        Some(path) if path != "-" => load_tasks(path)?,
        _ => vec![TaskSpec::new(1000.0, 100.0, 10.0, 2.0); DEFAULT_TASK_COUNT],
    };
    let num_simulations = match args.get(1) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| format!("Invalid simulation count '{}': {}", raw, e))?
            .clamp(MIN_SIMULATIONS, MAX_SIMULATIONS),
        None => DEFAULT_SIMULATIONS,
    };

    let mut config = SimulationConfig::new().with_concurrency(ConcurrencyMode::Rayon);
    if let Some(raw) = args.get(2) {
        let seed = raw
            .parse::<u64>()
            .map_err(|e| format!("Invalid seed '{}': {}", raw, e))?;
        config = config.with_seed(seed);
    }

    println!("Monte Carlo Simulation for Project Costs and Durations");
    println!("{} tasks, {} simulations\n", tasks.len(), num_simulations);

    let engine = SimulationEngine::new(config);
    let result = engine
        .run(&tasks, num_simulations)
        .map_err(|e| e.to_string())?;
    let summary = result.summary().map_err(|e| e.to_string())?;

    println!("Simulation Results");
    println!("{}\n", summary);

    let costs = result
        .cost_histogram(DEFAULT_HISTOGRAM_BINS)
        .map_err(|e| e.to_string())?;
    print_histogram("Distribution of Total Project Costs", &costs);

    let durations = result
        .duration_histogram(DEFAULT_HISTOGRAM_BINS)
        .map_err(|e| e.to_string())?;
    print_histogram("Distribution of Total Project Durations (days)", &durations);

    let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn load_tasks(path: &str) -> Result<Vec<TaskSpec>, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    serde_json::from_str(&contents).map_err(|e| format!("Failed to parse '{}': {}", path, e))
}

fn print_histogram(title: &str, histogram: &Histogram) {
    println!("{}", title);
    let peak = histogram.counts().iter().copied().max().unwrap_or(0).max(1);
    for (low, high, count) in histogram.bins() {
        let bar = "#".repeat(count * BAR_WIDTH / peak);
        println!("{:>12.2} - {:<12.2} {:>5} {}", low, high, count, bar);
    }
    println!();
}
