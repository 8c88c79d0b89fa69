use machine_learning::{
    arch::NetworkParams,
    dataset::Sample,
    training::{BatchTrainer, Termination, Tolerance},
};
use orchestrator::{
    HyperSearch, OrchestratorError, RunSummary,
    configs::{Bounds, GridConfig, SearchConfig, StepRange},
    search,
};

fn and2() -> Vec<Sample> {
    let and2 = [
        0.0, 0.0, 0.0, // 0
        0.0, 1.0, 0.0, // 0
        1.0, 0.0, 0.0, // 0
        1.0, 1.0, 1.0, // 1
    ];

    and2.chunks(3)
        .map(|row| Sample::new(row[..2].to_vec(), row[2..].to_vec()))
        .collect()
}

fn small_grid() -> GridConfig {
    GridConfig {
        learning_rate: StepRange {
            start: 0.5,
            end: 1.5,
            step: 0.5,
        },
        layers: Bounds::new(2, 3),
        neurons_per_layer: Bounds::new(2, 3),
        max_depth: Bounds::new(20, 40),
        inputs: 2,
        outputs: 1,
    }
}

fn config(workers: usize) -> SearchConfig {
    SearchConfig {
        workers,
        leaderboard_size: 3,
        grid_limit: None,
        seed: Some(17),
        grid: small_grid(),
    }
}

fn jobs(n: u64) -> Vec<NetworkParams> {
    (0..n)
        .map(|seed| NetworkParams {
            inputs: 2,
            outputs: 1,
            learning_rate: 1.,
            layers: 3,
            neurons_per_layer: 3,
            max_depth: 25,
            seed,
        })
        .collect()
}

fn seeds(runs: &[RunSummary]) -> Vec<u64> {
    let mut seeds: Vec<_> = runs.iter().map(|r| r.params.seed).collect();
    seeds.sort_unstable();
    seeds
}

#[test]
fn test_four_workers_drain_four_configurations_once() {
    let samples = and2();
    let criterion = Tolerance::new(0.5);
    let search = HyperSearch::new(config(4), &samples, &criterion).unwrap();

    let outcome = search.run_jobs(jobs(4)).unwrap();

    assert_eq!(outcome.runs.len(), 4);
    assert_eq!(seeds(&outcome.runs), [0, 1, 2, 3]);
    assert!(outcome.runs.iter().all(|r| r.worker_id < 4));
    assert_eq!(outcome.leaderboard.len(), 3);

    let best = outcome.best().unwrap();
    let top = outcome.runs.iter().map(|r| r.result.success).max().unwrap();
    assert_eq!(best.result.success, top);
}

#[test]
fn test_fewer_workers_than_jobs_still_drain_the_queue() {
    let samples = and2();
    let criterion = Tolerance::new(0.5);
    let search = HyperSearch::new(config(3), &samples, &criterion).unwrap();

    let outcome = search.run_jobs(jobs(10)).unwrap();
    assert_eq!(seeds(&outcome.runs), (0..10).collect::<Vec<_>>());
}

#[test]
fn test_run_tries_one_configuration_per_worker() {
    let samples = and2();
    let criterion = Tolerance::new(0.5);

    let outcome = search(config(4), &samples, &criterion).unwrap();
    assert_eq!(outcome.runs.len(), 4);

    let mut points: Vec<_> = outcome
        .runs
        .iter()
        .map(|r| {
            let p = r.params;
            (p.learning_rate.to_bits(), p.layers, p.neurons_per_layer)
        })
        .collect();
    points.sort_unstable();
    points.dedup();
    assert_eq!(points.len(), 4);

    assert!(outcome.runs.iter().all(|r| {
        (20..40).contains(&r.params.max_depth) && r.result.iterations <= r.params.max_depth
    }));
}

#[test]
fn test_same_seed_same_search() {
    let samples = and2();
    let criterion = Tolerance::new(0.5);

    let key = |runs: &[RunSummary]| {
        let mut key: Vec<_> = runs
            .iter()
            .map(|r| {
                let result = &r.result;
                (r.params.seed, result.success, result.iterations, result.mse.to_bits())
            })
            .collect();
        key.sort_unstable();
        key
    };

    // same jobs, spread over a different amount of workers
    let a = search(config(4), &samples, &criterion).unwrap();
    let mut spread = config(2);
    spread.grid_limit = Some(4);
    let c = search(spread, &samples, &criterion).unwrap();

    assert_eq!(key(&a.runs), key(&c.runs));
}

#[test]
fn test_worker_errors_are_tagged_and_returned() {
    let samples = vec![Sample::new(vec![0., 1., 2.], vec![1.])];
    let criterion = Tolerance::new(0.5);
    let search = HyperSearch::new(config(2), &samples, &criterion).unwrap();

    let err = search.run_jobs(jobs(4)).unwrap_err();
    assert!(matches!(err, OrchestratorError::WorkerError { worker_id, .. } if worker_id < 2));
}

#[test]
fn test_panicking_workers_are_reported() {
    let samples = and2();
    let criterion = |_: &[f64], _: &[f64]| -> bool { panic!("criterion blew up") };
    let search = HyperSearch::new(config(1), &samples, &criterion).unwrap();

    let err = search.run_jobs(jobs(1)).unwrap_err();
    assert!(matches!(err, OrchestratorError::WorkerPanicked { worker_id: 0 }));
}

#[test]
fn test_invalid_configs_are_rejected_up_front() {
    let samples = and2();
    let criterion = Tolerance::new(0.5);

    let mut invalid = config(4);
    invalid.leaderboard_size = 0;
    assert!(matches!(
        HyperSearch::new(invalid, &samples, &criterion),
        Err(OrchestratorError::InvalidConfig(_))
    ));
}

#[test]
fn test_grids_too_large_to_count_are_rejected() {
    let samples = and2();
    let criterion = Tolerance::new(0.5);

    for raw in [
        r#"{ "grid": { "neurons_per_layer": { "min": 18, "max": 18446744073709551615 } } }"#,
        r#"{ "grid": { "learning_rate": { "start": 1e-300, "end": 1e300, "step": 1e-300 } } }"#,
    ] {
        let config: SearchConfig = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            HyperSearch::new(config, &samples, &criterion),
            Err(OrchestratorError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_workers_train_with_the_given_trainer() {
    let samples = and2();
    let criterion = Tolerance::new(0.5);
    let trainer = BatchTrainer {
        acceptable_error: 1.,
        report_every: 0,
    };
    let search = HyperSearch::new(config(2), &samples, &criterion)
        .unwrap()
        .with_trainer(trainer);

    let outcome = search.run_jobs(jobs(3)).unwrap();
    assert!(outcome.runs.iter().all(|r| {
        r.result.iterations == 1 && r.result.termination == Termination::Converged
    }));
}
