mod criterion;
mod results;
mod schedule;
mod sink;
mod trainer;

pub use criterion::{SuccessCriterion, Tolerance};
pub use results::{BestIteration, Evaluation, IterationStats, Termination, TrainingResult};
pub use schedule::LearningRateSchedule;
pub use sink::{LogSink, ProgressSink};
pub use trainer::BatchTrainer;
