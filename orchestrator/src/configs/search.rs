use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::GridConfig;
use crate::{OrchestratorError, Result};

/// Everything a hyperparameter search needs besides its dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// The amount of worker threads.
    pub workers: usize,
    /// The amount of runs kept by the leaderboard.
    pub leaderboard_size: usize,
    /// The amount of grid points tried after shuffling, the worker count if unset.
    pub grid_limit: Option<usize>,
    /// Seeds the grid shuffle and every network's parameters, drawn from the OS if unset.
    pub seed: Option<u64>,
    pub grid: GridConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            leaderboard_size: 3,
            grid_limit: None,
            seed: None,
            grid: GridConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Reads a `SearchConfig` from a JSON file, missing fields take their default value.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// The amount of grid points the search tries.
    pub fn job_limit(&self) -> usize {
        self.grid_limit.unwrap_or(self.workers)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(OrchestratorError::InvalidConfig(
                "there must be at least one worker".into(),
            ));
        }

        if self.leaderboard_size == 0 {
            return Err(OrchestratorError::InvalidConfig(
                "the leaderboard must keep at least one run".into(),
            ));
        }

        if self.job_limit() == 0 {
            return Err(OrchestratorError::InvalidConfig(
                "the grid limit must be positive".into(),
            ));
        }

        self.grid.validate()
    }
}
