use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::info;
use machine_learning::{arch::Network, dataset::FeatureStats};
use orchestrator::Leaderboard;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A trained network along with the statistics its inputs are normalized with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub means: Vec<f64>,
    pub stdev: Vec<f64>,
    pub network: Network,
}

impl ModelSnapshot {
    pub fn new(stats: FeatureStats, network: Network) -> Self {
        Self {
            means: stats.means,
            stdev: stats.stdev,
            network,
        }
    }

    pub fn stats(&self) -> FeatureStats {
        FeatureStats {
            means: self.means.clone(),
            stdev: self.stdev.clone(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Saves every leaderboard entry as `bestRuns-network-{i}.json` and their summaries to
/// `bestRuns-logs.txt`, all inside `dir`.
pub fn save_leaderboard<P: AsRef<Path>>(
    dir: P,
    leaderboard: &Leaderboard,
    stats: &FeatureStats,
) -> Result<()> {
    let dir = dir.as_ref();
    let mut logs = String::new();

    for (i, entry) in leaderboard.entries().iter().enumerate() {
        let snapshot = ModelSnapshot::new(stats.clone(), entry.network.clone());
        snapshot.save(dir.join(format!("bestRuns-network-{i}.json")))?;

        logs.push_str(&entry.summary(i));
        logs.push('\n');
    }

    fs::write(dir.join("bestRuns-logs.txt"), logs)?;
    info!(
        "saved {} leaderboard run(s) to {}",
        leaderboard.len(),
        dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use machine_learning::arch::NetworkParams;

    use super::*;

    #[test]
    fn snapshot_round_trip_keeps_predictions() {
        let params = NetworkParams {
            seed: 11,
            ..Default::default()
        };
        let stats = FeatureStats {
            means: vec![1.; 18],
            stdev: vec![2.; 18],
        };
        let snapshot = ModelSnapshot::new(stats.clone(), Network::seeded(&params).unwrap());

        let path = std::env::temp_dir().join(format!("snapshot-{}.json", std::process::id()));
        snapshot.save(&path).unwrap();
        let restored = ModelSnapshot::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(restored.stats(), stats);

        let x = vec![0.3; 18];
        let mut before = snapshot.network.clone();
        let mut after = restored.network;
        assert_eq!(before.predict(&x).unwrap(), after.predict(&x).unwrap());
    }
}
