pub mod configs;
pub mod error;
mod grid;
mod leaderboard;
mod queue;
mod session;

use machine_learning::{dataset::Sample, training::SuccessCriterion};

pub use error::{OrchestratorError, Result};
pub use grid::ParamGrid;
pub use leaderboard::{Leaderboard, RunRecord};
pub use queue::JobQueue;
pub use session::{HyperSearch, RunSummary, SearchOutcome};

use crate::configs::SearchConfig;

/// Searches the configured hyperparameter grid for the network that does best on `samples`.
///
/// # Errors
/// Returns an `OrchestratorError` if the configuration is invalid or any worker fails.
pub fn search<C>(config: SearchConfig, samples: &[Sample], criterion: &C) -> Result<SearchOutcome>
where
    C: SuccessCriterion + Sync + ?Sized,
{
    log::info!(
        "searching with {} worker(s) over {} sample(s)",
        config.workers,
        samples.len()
    );
    HyperSearch::new(config, samples, criterion)?.run()
}
