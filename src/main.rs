use std::env;

use anyhow::{Context, Result};
use league_search::{
    cli::{Args, ModelSource},
    pipeline,
    players::read_players,
    snapshot::{self, ModelSnapshot},
};
use log::info;
use orchestrator::configs::SearchConfig;

const NETWORK_FILE: &str = "network.json";

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse(env::args().skip(1))?;
    let test = read_players(&args.test)
        .with_context(|| format!("failed to read the test set {}", args.test.display()))?;

    let mut model = match args.model {
        ModelSource::Snapshot(path) => ModelSnapshot::load(&path)
            .with_context(|| format!("failed to load the snapshot {}", path.display()))?,
        ModelSource::Train(path) => {
            let players = read_players(&path)
                .with_context(|| format!("failed to read the training set {}", path.display()))?;

            let mut config = match &args.config {
                Some(path) => SearchConfig::from_json_file(path)
                    .with_context(|| format!("failed to load the config {}", path.display()))?,
                None => SearchConfig::default(),
            };
            if args.seed.is_some() {
                config.seed = args.seed;
            }

            let trained = pipeline::train(&players, config)?;
            let stats = trained.snapshot.stats();
            snapshot::save_leaderboard(".", &trained.outcome.leaderboard, &stats)
                .context("failed to save the leaderboard")?;
            trained.snapshot
        }
    };

    info!("testing on {} player(s)", test.len());
    let report = pipeline::test(&mut model, &test)?;
    println!(
        "Success of {:.2}% ({}/{}). Mean error = {:.4}",
        report.success_rate(),
        report.success,
        report.count,
        report.mean_distance()
    );

    model
        .save(NETWORK_FILE)
        .with_context(|| format!("failed to save {NETWORK_FILE}"))?;
    info!("network saved to {NETWORK_FILE}");

    Ok(())
}
