use log::{debug, info};
use machine_learning::dataset::{FeatureStats, Sample};
use orchestrator::{OrchestratorError, SearchOutcome, configs::SearchConfig};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    AppErr, Result,
    league::{League, OUTPUTS, same_league},
    players::{FEATURES, Player},
    snapshot::ModelSnapshot,
};

/// The result of a training search.
pub struct Trained {
    /// The best network and the statistics it was trained with.
    pub snapshot: ModelSnapshot,
    pub outcome: SearchOutcome,
}

/// Fits the feature statistics on `players` and searches the best network for them.
///
/// # Errors
/// `AppErr::Search` if the configuration doesn't fit the player features or the search
/// fails, `AppErr::NoRun` if no run completed.
pub fn train(players: &[Player], config: SearchConfig) -> Result<Trained> {
    let (inputs, outputs) = (config.grid.inputs, config.grid.outputs);
    if inputs != FEATURES || outputs != OUTPUTS {
        return Err(OrchestratorError::InvalidConfig(format!(
            "the grid must map {FEATURES} inputs to {OUTPUTS} outputs, got {inputs} and {outputs}"
        ))
        .into());
    }

    let rows: Vec<&[f64]> = players.iter().map(|p| p.features.as_slice()).collect();
    let stats = FeatureStats::fit(&rows)?;

    let mut samples = players
        .iter()
        .map(|p| -> Result<Sample> {
            let input = stats.normalize(&p.features)?;
            Ok(Sample::new(input, p.league.to_output()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Sample::shuffle(&mut samples, &mut rng);

    info!("training on {} player(s)", samples.len());
    let outcome = orchestrator::search(config, &samples, &same_league)?;
    let network = outcome.best().ok_or(AppErr::NoRun)?.network.clone();

    Ok(Trained {
        snapshot: ModelSnapshot::new(stats, network),
        outcome,
    })
}

/// How a network did on a test set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TestReport {
    pub success: usize,
    pub count: usize,
    /// Sum of the league distances between predictions and real leagues.
    pub distance: usize,
}

impl TestReport {
    pub fn success_rate(&self) -> f64 {
        if self.count == 0 {
            return 0.;
        }

        self.success as f64 * 100. / self.count as f64
    }

    /// The mean amount of leagues a prediction is off by.
    pub fn mean_distance(&self) -> f64 {
        if self.count == 0 {
            return 0.;
        }

        self.distance as f64 / self.count as f64
    }
}

/// Predicts the league of every player and compares it with the real one.
pub fn test(snapshot: &mut ModelSnapshot, players: &[Player]) -> Result<TestReport> {
    let stats = snapshot.stats();
    let mut report = TestReport::default();

    for (i, player) in players.iter().enumerate() {
        let input = stats.normalize(&player.features)?;
        let output = snapshot.network.predict(&input)?;
        let predicted = League::from_output(&output)?;

        debug!("Player {i} is {}. Result is {predicted}", player.league);

        report.count += 1;
        report.distance += player.league.distance(predicted);
        if same_league(&output, &player.league.to_output()) {
            report.success += 1;
        }
    }

    Ok(report)
}
