use std::time::Instant;

use ndarray::ArrayView1;

use super::{
    BestIteration, IterationStats, LearningRateSchedule, ProgressSink, SuccessCriterion,
    Termination, TrainingResult, results::Evaluation,
};
use crate::{MlErr, Result, arch::Network, dataset::Sample};

/// Full batch gradient descent with an adaptive learning rate.
#[derive(Debug, Clone, Copy)]
pub struct BatchTrainer {
    /// Training stops once the mean squared error gets to or below this value.
    pub acceptable_error: f64,
    /// Iterations between two progress reports, zero disables them.
    pub report_every: usize,
}

impl Default for BatchTrainer {
    fn default() -> Self {
        Self {
            acceptable_error: 0.005,
            report_every: 50,
        }
    }
}

impl BatchTrainer {
    /// Trains `network` over `samples` until it converges, diverges or reaches its maximum
    /// depth.
    ///
    /// Every iteration goes over the whole batch in the given order, accumulating every
    /// neuron's deltas, and applies them once at the end.
    ///
    /// # Arguments
    /// * `network` - The network to train, its learning rate is reset to the base rate.
    /// * `samples` - The training batch.
    /// * `criterion` - Decides whether a prediction counts as a success.
    /// * `sink` - Receives the statistics of every iteration and periodic reports.
    ///
    /// # Errors
    /// `MlErr::EmptyBatch` if there are no samples, or `MlErr::SizeMismatch` if any sample
    /// doesn't fit the network.
    pub fn train<C, P>(
        &self,
        network: &mut Network,
        samples: &[Sample],
        criterion: &C,
        sink: &mut P,
    ) -> Result<TrainingResult>
    where
        C: SuccessCriterion + ?Sized,
        P: ProgressSink + ?Sized,
    {
        if samples.is_empty() {
            return Err(MlErr::EmptyBatch);
        }

        for sample in samples {
            network.check_sample(sample)?;
        }

        let start = Instant::now();
        let mut schedule = LearningRateSchedule::new(network.base_learning_rate());
        network.set_learning_rate(schedule.learning_rate());

        let mut best: Option<BestIteration> = None;
        let mut iteration = 0;

        let (evaluation, termination) = loop {
            let mut evaluation = Evaluation::default();

            for sample in samples {
                let output = network.predict(sample.input())?;
                network.backward(ArrayView1::from(sample.target()))?;
                evaluation.record(&output, sample.target(), criterion);
            }

            network.update_weights();
            iteration += 1;

            let mse = evaluation.mse();
            let learning_rate = schedule.step(evaluation.success);
            network.set_learning_rate(learning_rate);

            if best.is_none_or(|b| evaluation.success > b.success) {
                best = Some(BestIteration {
                    iteration,
                    success: evaluation.success,
                    mse,
                });
            }

            sink.observe(&IterationStats {
                iteration,
                mse,
                success: evaluation.success,
                count: evaluation.count,
                learning_rate,
            });

            if self.report_every > 0 && (iteration - 1) % self.report_every == 0 {
                sink.report(&format!(
                    "Batch iteration {iteration:04}: MSE={mse:.8} /\\ Success={:.2}% ({}/{})",
                    evaluation.success_rate(),
                    evaluation.success,
                    evaluation.count
                ));
            }

            if mse.is_nan() {
                break (evaluation, Termination::Diverged);
            }

            if mse <= self.acceptable_error {
                break (evaluation, Termination::Converged);
            }

            if iteration >= network.max_depth() {
                break (evaluation, Termination::DepthExceeded);
            }
        };

        let duration = start.elapsed();
        sink.report(&format!(
            "Batch training done in {:.3}s after {iteration} iterations ({termination:?})",
            duration.as_secs_f64()
        ));

        Ok(TrainingResult {
            best_iteration: best.unwrap_or_default(),
            success: evaluation.success,
            count: evaluation.count,
            mse: evaluation.mse(),
            duration,
            iterations: iteration,
            termination,
        })
    }
}
