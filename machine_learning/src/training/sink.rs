use log::{debug, info};

use super::IterationStats;

/// Receives the progress of a training run.
pub trait ProgressSink {
    /// Receives a human readable status line. Must return quickly.
    fn report(&mut self, line: &str);

    /// Receives the statistics of every training iteration.
    fn observe(&mut self, _stats: &IterationStats) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(&str),
{
    fn report(&mut self, line: &str) {
        self(line)
    }
}

/// Forwards the progress of a training run to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogSink {
    tag: String,
}

impl LogSink {
    /// Creates a new `LogSink`.
    ///
    /// # Arguments
    /// * `tag` - Prepended to every line, identifies the run.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl ProgressSink for LogSink {
    fn report(&mut self, line: &str) {
        info!("{} {line}", self.tag);
    }

    fn observe(&mut self, stats: &IterationStats) {
        debug!(
            "{} iteration={} mse={:.8} success={}/{} lr={}",
            self.tag, stats.iteration, stats.mse, stats.success, stats.count, stats.learning_rate
        );
    }
}
