use proptest::prelude::*;
use projsim::core::results::stats::{percentile, percentiles};
use projsim::{
    ConcurrencyMode, Histogram, SimulationConfig, SimulationEngine, SimulationError,
    SimulationRun, TaskSpec, DEFAULT_HISTOGRAM_BINS,
};

/// Three tasks at the defaults of the estimation form
fn form_defaults() -> Vec<TaskSpec> {
    vec![TaskSpec::new(1000.0, 100.0, 10.0, 2.0); 3]
}

#[test]
fn test_percentile_sanity() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(percentiles(&data, &[0.0, 50.0, 100.0]).unwrap(), vec![1.0, 3.0, 5.0]);
}

#[test]
fn test_summary_of_default_project() {
    let engine = SimulationEngine::new(SimulationConfig::new().with_seed(99));
    let result = engine.run(&form_defaults(), 1000).unwrap();
    let summary = result.summary().unwrap();

    assert_eq!(summary.num_simulations, 1000);
    assert_eq!(summary.run_id, result.run_id());
    // Sum of three tasks: mean 3000, std 100 * sqrt(3)
    assert!((summary.mean_cost - 3000.0).abs() < 25.0);
    assert!((summary.mean_duration - 30.0).abs() < 0.5);
    assert!(summary.cost_interval.lower < summary.mean_cost);
    assert!(summary.cost_interval.upper > summary.mean_cost);
    assert!(summary.duration_interval.contains(summary.mean_duration));
    // 95% of a normal with std ~173 spans roughly 2 * 1.96 * 173
    assert!((summary.cost_interval.width() - 679.0).abs() < 100.0);
}

#[test]
fn test_histograms_cover_every_run() {
    let engine = SimulationEngine::new(
        SimulationConfig::new()
            .with_seed(3)
            .with_concurrency(ConcurrencyMode::Rayon),
    );
    let result = engine.run(&form_defaults(), 5000).unwrap();

    let costs = result.cost_histogram(DEFAULT_HISTOGRAM_BINS).unwrap();
    let durations = result.duration_histogram(DEFAULT_HISTOGRAM_BINS).unwrap();
    assert_eq!(costs.bin_count(), 30);
    assert_eq!(costs.total(), 5000);
    assert_eq!(durations.total(), 5000);

    let min = result.total_costs().iter().cloned().fold(f64::INFINITY, f64::min);
    let max = result.total_costs().iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(costs.edges()[0], min);
    assert_eq!(costs.edges()[30], max);
}

#[test]
fn test_histogram_is_reproducible() {
    let data = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let first = Histogram::from_samples(&data, 30).unwrap();
    let second = Histogram::from_samples(&data, 30).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_run_produces_nothing() {
    let engine = SimulationEngine::default();
    let run = SimulationRun::new(form_defaults(), 0);
    assert!(matches!(
        engine.run_simulation(&run),
        Err(SimulationError::InvalidParameter(_))
    ));
}

#[test]
fn test_task_spec_from_json() {
    let tasks: Vec<TaskSpec> = serde_json::from_str(
        r#"[{"mean_cost": 1000.0, "std_cost": 100.0, "mean_duration": 10.0, "std_duration": 2.0}]"#,
    )
    .unwrap();
    assert_eq!(tasks, vec![TaskSpec::new(1000.0, 100.0, 10.0, 2.0)]);
}

proptest! {
    #[test]
    fn prop_output_length_matches(n in 1usize..400, task_count in 0usize..5, seed in any::<u64>()) {
        let tasks = vec![TaskSpec::new(50.0, 5.0, 2.0, 0.5); task_count];
        let engine = SimulationEngine::new(SimulationConfig::new().with_seed(seed));
        let result = engine.run(&tasks, n).unwrap();
        prop_assert_eq!(result.total_costs().len(), n);
        prop_assert_eq!(result.total_durations().len(), n);
    }

    #[test]
    fn prop_percentile_within_sample_range(
        data in prop::collection::vec(-1.0e6f64..1.0e6, 1..200),
        p in 0.0f64..=100.0,
    ) {
        let value = percentile(&data, p).unwrap();
        let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(value >= min && value <= max);
    }

    #[test]
    fn prop_histogram_counts_every_sample(
        data in prop::collection::vec(-1.0e3f64..1.0e3, 1..300),
        bins in 1usize..60,
    ) {
        let hist = Histogram::from_samples(&data, bins).unwrap();
        prop_assert_eq!(hist.bin_count(), bins);
        prop_assert_eq!(hist.total(), data.len());
    }
}
