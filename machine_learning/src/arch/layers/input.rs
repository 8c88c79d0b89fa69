use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::{MlErr, Result, arch::activations::sigmoid};

/// The entry point of a network: squashes every raw feature through the sigmoid and has no
/// trainable parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Input {
    dim: usize,
}

impl Input {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn forward(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        if x.len() != self.dim {
            return Err(MlErr::SizeMismatch {
                a: "sample input",
                b: "input layer",
                got: x.len(),
                expected: self.dim,
            });
        }

        Ok(x.mapv(sigmoid))
    }
}
