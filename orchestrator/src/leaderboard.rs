use machine_learning::{
    arch::{Network, NetworkParams},
    training::TrainingResult,
};

/// A trained network along with how it was built and how it did.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub network: Network,
    pub result: TrainingResult,
    pub params: NetworkParams,
}

impl RunRecord {
    /// A single line describing this run, `index` being its position in the leaderboard.
    pub fn summary(&self, index: usize) -> String {
        let (params, result) = (&self.params, &self.result);
        format!(
            "Run {index} had params Layers={} Neurons={} LR={} Depth={} Count={} Success={} MSE={:.6} Time={:.3}s %={:.2}",
            params.layers,
            params.neurons_per_layer,
            params.learning_rate,
            params.max_depth,
            result.count,
            result.success,
            result.mse,
            result.duration.as_secs_f64(),
            result.success_rate()
        )
    }
}

/// Keeps a bounded amount of the most successful runs.
///
/// Once full, a new run overwrites every entry with a lower success count, so the board
/// can end up holding several copies of the same run.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<RunRecord>,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, record: RunRecord) {
        if self.entries.len() < self.capacity {
            self.entries.push(record);
            return;
        }

        let success = record.result.success;
        for entry in &mut self.entries {
            if entry.result.success < success {
                *entry = record.clone();
            }
        }
    }

    /// The entry with the highest success count, the earliest one on ties.
    pub fn best(&self) -> Option<&RunRecord> {
        self.entries
            .iter()
            .rev()
            .max_by_key(|entry| entry.result.success)
    }

    pub fn entries(&self) -> &[RunRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use machine_learning::training::{BestIteration, Termination};

    use super::*;

    fn record(success: usize) -> RunRecord {
        let params = NetworkParams {
            inputs: 2,
            outputs: 1,
            layers: 2,
            seed: success as u64,
            ..Default::default()
        };

        RunRecord {
            network: Network::seeded(&params).unwrap(),
            result: TrainingResult {
                best_iteration: BestIteration::default(),
                success,
                count: 40,
                mse: 0.25,
                duration: Duration::from_millis(1500),
                iterations: 10,
                termination: Termination::DepthExceeded,
            },
            params,
        }
    }

    fn successes(board: &Leaderboard) -> Vec<usize> {
        board.entries().iter().map(|e| e.result.success).collect()
    }

    #[test]
    fn fills_up_to_capacity() {
        let mut board = Leaderboard::new(3);
        for success in [5, 1, 3] {
            board.insert(record(success));
        }

        assert_eq!(successes(&board), [5, 1, 3]);
        board.insert(record(0));
        assert_eq!(successes(&board), [5, 1, 3]);
    }

    #[test]
    fn a_better_run_overwrites_every_lower_entry() {
        let mut board = Leaderboard::new(3);
        for success in [10, 20, 30] {
            board.insert(record(success));
        }

        board.insert(record(25));
        assert_eq!(successes(&board), [25, 25, 30]);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn best_prefers_the_earliest_on_ties() {
        let mut board = Leaderboard::new(3);
        for success in [10, 30, 30] {
            board.insert(record(success));
        }

        let best = board.best().unwrap();
        assert_eq!(best.result.success, 30);
        assert_eq!(best.params.seed, board.entries()[1].params.seed);
        assert!(std::ptr::eq(best, &board.entries()[1]));
    }

    #[test]
    fn summary_line() {
        assert_eq!(
            record(10).summary(2),
            "Run 2 had params Layers=2 Neurons=18 LR=0.002 Depth=2000 Count=40 Success=10 MSE=0.250000 Time=1.500s %=25.00"
        );
    }
}
