use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidTopology(String),
    MissingForwardPass,
    EmptyBatch,
    InvalidDistribution(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => {
                format!(
                    "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
                )
            }
            MlErr::InvalidTopology(detail) => format!("Invalid network topology: {detail}"),
            MlErr::MissingForwardPass => {
                "Tried to compute a gradient before any forward pass".to_string()
            }
            MlErr::EmptyBatch => "Tried to train over an empty batch".to_string(),
            MlErr::InvalidDistribution(detail) => {
                format!("Failed to build the weight distribution: {detail}")
            }
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidDistribution(value.to_string())
    }
}
