use machine_learning::{
    arch::{Network, NetworkParams},
    dataset::Sample,
    training::{IterationStats, ProgressSink, Termination, Tolerance, TrainingResult},
};

const SEED: u64 = 42;

fn xor() -> Vec<Sample> {
    let xor2 = [
        0.0, 0.0, 0.0, // 0
        0.0, 1.0, 1.0, // 1
        1.0, 0.0, 1.0, // 1
        1.0, 1.0, 0.0, // 0
    ];

    xor2.chunks(3)
        .map(|row| Sample::new(row[..2].to_vec(), row[2..].to_vec()))
        .collect()
}

fn params(seed: u64) -> NetworkParams {
    NetworkParams {
        inputs: 2,
        outputs: 1,
        learning_rate: 2.5,
        layers: 3,
        neurons_per_layer: 4,
        max_depth: 2000,
        seed,
    }
}

#[derive(Default)]
struct MseTrace(Vec<f64>);

impl ProgressSink for MseTrace {
    fn report(&mut self, _: &str) {}

    fn observe(&mut self, stats: &IterationStats) {
        self.0.push(stats.mse);
    }
}

fn train(seed: u64) -> (Network, TrainingResult, MseTrace) {
    let mut network = Network::seeded(&params(seed)).unwrap();
    let mut trace = MseTrace::default();
    let result = network
        .train_batch(&xor(), &Tolerance::new(0.5), &mut trace)
        .unwrap();

    (network, result, trace)
}

#[test]
fn test_xor_converges_before_max_depth() {
    let (mut network, result, trace) = train(SEED);

    assert_eq!(result.termination, Termination::Converged);
    assert!(result.iterations < 2000);
    assert!(result.mse <= 0.005);
    assert_eq!(result.success, 4);
    assert_eq!(result.count, 4);
    assert_eq!(trace.0.len(), result.iterations);
    assert!(trace.0.iter().all(|&mse| mse >= 0.));

    let evaluation = network.evaluate(&xor(), &Tolerance::new(0.5)).unwrap();
    assert_eq!(evaluation.success, 4);
    assert!(evaluation.mse() < 0.01);

    for sample in xor() {
        let y = network.predict(sample.input()).unwrap();
        assert_eq!(y[0].round(), sample.target()[0]);
    }
}

#[test]
fn test_xor_training_is_reproducible() {
    let (mut a, result_a, trace_a) = train(SEED);
    let (mut b, result_b, trace_b) = train(SEED);

    assert_eq!(result_a.iterations, result_b.iterations);
    assert_eq!(result_a.termination, result_b.termination);
    assert_eq!(result_a.best_iteration, result_b.best_iteration);
    assert_eq!(trace_a.0, trace_b.0);
    assert_eq!(a.predict(&[1., 0.]).unwrap(), b.predict(&[1., 0.]).unwrap());
}

#[test]
fn test_trained_network_survives_a_json_round_trip() {
    let (mut network, _, _) = train(SEED);
    let json = serde_json::to_string(&network).unwrap();
    let mut restored: Network = serde_json::from_str(&json).unwrap();

    for sample in xor() {
        assert_eq!(
            network.predict(sample.input()).unwrap(),
            restored.predict(sample.input()).unwrap()
        );
    }
}
