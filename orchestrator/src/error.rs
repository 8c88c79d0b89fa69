use std::{fmt, io};

use machine_learning::MlErr;

/// The result type used in the entire orchestrator.
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// All errors that can occur in the orchestrator.
#[derive(Debug)]
pub enum OrchestratorError {
    /// Invalid configuration, caught before spawning any worker.
    InvalidConfig(String),
    /// A worker failed to build or train its network.
    WorkerError { worker_id: usize, source: MlErr },
    /// A worker panicked before finishing its jobs.
    WorkerPanicked { worker_id: usize },
    /// The configuration file couldn't be parsed.
    Parse(serde_json::Error),
    /// An underlying I/O error not covered by the above variants.
    Io(io::Error),
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::WorkerError { worker_id, source } => {
                write!(f, "worker {worker_id} error: {source}")
            }
            Self::WorkerPanicked { worker_id } => write!(f, "worker {worker_id} panicked"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for OrchestratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WorkerError { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OrchestratorError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for OrchestratorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
