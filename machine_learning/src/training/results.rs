use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::SuccessCriterion;

/// The iteration with the highest success count of a training run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BestIteration {
    pub iteration: usize,
    pub success: usize,
    pub mse: f64,
}

/// Why a training run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The mean squared error reached the acceptable error.
    Converged,
    /// The maximum amount of iterations was reached first.
    DepthExceeded,
    /// The mean squared error became `NaN`.
    Diverged,
}

/// The outcome of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub best_iteration: BestIteration,
    /// Success count of the last iteration.
    pub success: usize,
    /// Sample count of the last iteration.
    pub count: usize,
    /// Mean squared error of the last iteration.
    pub mse: f64,
    pub duration: Duration,
    pub iterations: usize,
    pub termination: Termination,
}

impl TrainingResult {
    /// The success rate of the last iteration, in percent.
    pub fn success_rate(&self) -> f64 {
        percent(self.success, self.count)
    }
}

/// Statistics of a single training iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    pub iteration: usize,
    pub mse: f64,
    pub success: usize,
    pub count: usize,
    /// The learning rate the next iteration will use.
    pub learning_rate: f64,
}

/// Accumulates how a network does over a set of samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluation {
    pub success: usize,
    pub count: usize,
    squared_error: f64,
    values: usize,
}

impl Evaluation {
    /// Records one prediction.
    ///
    /// # Arguments
    /// * `predicted` - The output of the network.
    /// * `expected` - The target output.
    /// * `criterion` - Decides whether the prediction counts as a success.
    pub fn record<C>(&mut self, predicted: &[f64], expected: &[f64], criterion: &C)
    where
        C: SuccessCriterion + ?Sized,
    {
        self.squared_error += predicted
            .iter()
            .zip(expected)
            .map(|(p, e)| (e - p).powi(2))
            .sum::<f64>();
        self.values += expected.len();

        if criterion.is_success(predicted, expected) {
            self.success += 1;
        }
        self.count += 1;
    }

    /// The mean squared error per output value, `NaN` if nothing was recorded.
    pub fn mse(&self) -> f64 {
        self.squared_error / self.values as f64
    }

    /// The success rate, in percent.
    pub fn success_rate(&self) -> f64 {
        percent(self.success, self.count)
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.;
    }

    part as f64 * 100. / total as f64
}
