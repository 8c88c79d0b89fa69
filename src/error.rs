use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use machine_learning::MlErr;
use orchestrator::OrchestratorError;

/// The result type used across the league classifier.
pub type Result<T> = std::result::Result<T, AppErr>;

/// The league classifier's error type.
#[derive(Debug)]
pub enum AppErr {
    /// A row of the player file doesn't have enough columns.
    MissingColumns { line: usize, got: usize },
    /// A cell of the player file isn't a number.
    InvalidValue {
        line: usize,
        column: usize,
        value: String,
    },
    InvalidLeague(String),
    /// A network output doesn't have one value per league.
    OutputWidth { got: usize, expected: usize },
    /// The search didn't complete any run.
    NoRun,
    Usage(String),
    Ml(MlErr),
    Search(OrchestratorError),
    Json(serde_json::Error),
    Io(io::Error),
}

impl Display for AppErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErr::MissingColumns { line, got } => {
                write!(f, "line {line}: expected 20 columns, got {got}")
            }
            AppErr::InvalidValue {
                line,
                column,
                value,
            } => write!(f, "line {line}, column {column}: invalid value {value:?}"),
            AppErr::InvalidLeague(value) => write!(f, "invalid league {value:?}"),
            AppErr::OutputWidth { got, expected } => {
                write!(f, "expected {expected} output values, got {got}")
            }
            AppErr::NoRun => write!(f, "the search didn't complete any run"),
            AppErr::Usage(msg) => write!(f, "{msg}"),
            AppErr::Ml(e) => write!(f, "{e}"),
            AppErr::Search(e) => write!(f, "{e}"),
            AppErr::Json(e) => write!(f, "json error: {e}"),
            AppErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for AppErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppErr::Ml(e) => Some(e),
            AppErr::Search(e) => Some(e),
            AppErr::Json(e) => Some(e),
            AppErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for AppErr {
    fn from(e: MlErr) -> Self {
        Self::Ml(e)
    }
}

impl From<OrchestratorError> for AppErr {
    fn from(e: OrchestratorError) -> Self {
        Self::Search(e)
    }
}

impl From<serde_json::Error> for AppErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<io::Error> for AppErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
