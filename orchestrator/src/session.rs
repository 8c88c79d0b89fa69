use std::thread;

use log::{debug, info, warn};
use machine_learning::{
    arch::{Network, NetworkParams},
    dataset::Sample,
    training::{BatchTrainer, LogSink, SuccessCriterion, TrainingResult},
};
use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    OrchestratorError, Result,
    configs::SearchConfig,
    grid::ParamGrid,
    leaderboard::{Leaderboard, RunRecord},
    queue::JobQueue,
};

/// A completed run, as seen by the worker that did it.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub worker_id: usize,
    pub params: NetworkParams,
    pub result: TrainingResult,
}

/// Everything a search leaves behind.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub leaderboard: Leaderboard,
    /// Every completed run, in completion order.
    pub runs: Vec<RunSummary>,
}

impl SearchOutcome {
    /// The run with the highest success count, `None` if no run completed.
    pub fn best(&self) -> Option<&RunRecord> {
        self.leaderboard.best()
    }
}

/// Trains a fresh network per hyperparameter configuration on a pool of worker threads.
pub struct HyperSearch<'a, C: ?Sized> {
    config: SearchConfig,
    samples: &'a [Sample],
    criterion: &'a C,
    trainer: BatchTrainer,
}

impl<'a, C> HyperSearch<'a, C>
where
    C: SuccessCriterion + Sync + ?Sized,
{
    /// Creates a new `HyperSearch`.
    ///
    /// # Arguments
    /// * `config` - The search configuration.
    /// * `samples` - The training set, shared by every worker.
    /// * `criterion` - Decides whether a prediction counts as a success.
    ///
    /// # Errors
    /// `OrchestratorError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: SearchConfig, samples: &'a [Sample], criterion: &'a C) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            samples,
            criterion,
            trainer: BatchTrainer::default(),
        })
    }

    /// Replaces the trainer every worker uses.
    pub fn with_trainer(mut self, trainer: BatchTrainer) -> Self {
        self.trainer = trainer;
        self
    }

    /// Generates the grid, shuffles it, keeps the first `job_limit` points and tries them.
    pub fn run(&self) -> Result<SearchOutcome> {
        let mut rng = generate_rng(self.config.seed);
        let grid = ParamGrid::new(self.config.grid.clone(), &mut rng)?;
        let size = grid.len();
        let mut jobs: Vec<_> = grid.collect();
        jobs.shuffle(&mut rng);
        jobs.truncate(self.config.job_limit());

        info!("trying {} of {size} configurations", jobs.len());
        self.run_jobs(jobs)
    }

    /// Tries every configuration of `jobs` once, spread over the worker threads.
    ///
    /// # Errors
    /// The first worker error, tagged with its worker id, once every worker stopped.
    pub fn run_jobs<J>(&self, jobs: J) -> Result<SearchOutcome>
    where
        J: IntoIterator<Item = NetworkParams>,
        J::IntoIter: Send,
    {
        let queue = JobQueue::new(jobs);
        let leaderboard = Mutex::new(Leaderboard::new(self.config.leaderboard_size));
        let runs = Mutex::new(Vec::new());

        info!("starting {} worker(s)", self.config.workers);
        let joined: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..self.config.workers)
                .map(|worker_id| {
                    let (queue, leaderboard, runs) = (&queue, &leaderboard, &runs);
                    s.spawn(move || self.worker(worker_id, queue, leaderboard, runs))
                })
                .collect();

            handles.into_iter().map(|h| h.join()).collect()
        });

        let mut failure = None;
        for (worker_id, outcome) in joined.into_iter().enumerate() {
            let err = match outcome {
                Ok(Ok(done)) => {
                    debug!(worker_id = worker_id; "worker finished after {done} job(s)");
                    continue;
                }
                Ok(Err(source)) => OrchestratorError::WorkerError { worker_id, source },
                Err(_) => OrchestratorError::WorkerPanicked { worker_id },
            };

            warn!("{err}");
            failure = failure.or(Some(err));
        }

        if let Some(err) = failure {
            return Err(err);
        }

        let outcome = SearchOutcome {
            leaderboard: leaderboard.into_inner(),
            runs: runs.into_inner(),
        };

        match outcome.best() {
            Some(best) => info!(
                "best run: layers={} neurons={} rate={} depth={} success={}/{}",
                best.params.layers,
                best.params.neurons_per_layer,
                best.params.learning_rate,
                best.params.max_depth,
                best.result.success,
                best.result.count
            ),
            None => warn!("no configuration was tried"),
        }

        Ok(outcome)
    }

    /// Pulls jobs until the queue runs dry, returning how many it completed.
    fn worker<I>(
        &self,
        worker_id: usize,
        queue: &JobQueue<I>,
        leaderboard: &Mutex<Leaderboard>,
        runs: &Mutex<Vec<RunSummary>>,
    ) -> machine_learning::Result<usize>
    where
        I: Iterator<Item = NetworkParams>,
    {
        let mut done = 0;

        while let Some(params) = queue.next() {
            debug!(worker_id = worker_id; "training with {params:?}");

            let result = self.train(worker_id, &params);
            let (network, result) = match result {
                Ok(trained) => trained,
                Err(e) => {
                    queue.close();
                    return Err(e);
                }
            };

            info!(
                worker_id = worker_id;
                "run done: layers={} neurons={} rate={} success={}/{} mse={:.6} ({:?})",
                params.layers,
                params.neurons_per_layer,
                params.learning_rate,
                result.success,
                result.count,
                result.mse,
                result.termination
            );

            runs.lock().push(RunSummary {
                worker_id,
                params,
                result: result.clone(),
            });

            leaderboard.lock().insert(RunRecord {
                network,
                result,
                params,
            });

            done += 1;
        }

        Ok(done)
    }

    fn train(
        &self,
        worker_id: usize,
        params: &NetworkParams,
    ) -> machine_learning::Result<(Network, TrainingResult)> {
        let mut network = Network::seeded(params)?;
        let mut sink = LogSink::new(format!("[worker {worker_id}]"));
        let result = self
            .trainer
            .train(&mut network, self.samples, self.criterion, &mut sink)?;

        Ok((network, result))
    }
}

fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
