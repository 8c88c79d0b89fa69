use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::{Dense, Input};
use crate::Result;

/// A network layer, by the role it plays in the network.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Layer {
    Input(Input),
    Hidden(Dense),
    Output(Dense),
}
use Layer::*;

impl Layer {
    pub fn input(dim: usize) -> Self {
        Input(super::Input::new(dim))
    }

    /// The amount of values this layer produces.
    pub fn size(&self) -> usize {
        match self {
            Input(l) => l.dim(),
            Hidden(l) | Output(l) => l.size(),
        }
    }

    /// The amount of values this layer consumes.
    pub fn fan_in(&self) -> usize {
        match self {
            Input(l) => l.dim(),
            Hidden(l) | Output(l) => l.fan_in(),
        }
    }

    pub fn forward(&mut self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        match self {
            Input(l) => l.forward(x),
            Hidden(l) | Output(l) => l.forward(x),
        }
    }

    /// Accumulates this layer's deltas and computes the error signal for the layer below.
    ///
    /// # Arguments
    /// * `signal` - The expected output for the `Output` layer, or the error vector handed
    ///   down by the next layer for a `Hidden` one.
    /// * `learning_rate` - The network's current learning rate.
    ///
    /// # Returns
    /// The error vector for the previous layer, `None` for the `Input` layer.
    pub fn compute_gradients(
        &mut self,
        signal: ArrayView1<f64>,
        learning_rate: f64,
    ) -> Result<Option<Array1<f64>>> {
        match self {
            Input(_) => Ok(None),
            Hidden(l) => {
                l.check_signal(signal, "error signal")?;
                l.backward(signal.iter().copied(), learning_rate).map(Some)
            }
            Output(l) => {
                l.check_signal(signal, "expected output")?;
                let errors: Vec<_> = signal
                    .iter()
                    .zip(l.outputs())
                    .map(|(expected, output)| expected - output)
                    .collect();

                l.backward(errors, learning_rate).map(Some)
            }
        }
    }

    pub fn update_weights(&mut self) {
        match self {
            Input(_) => {}
            Hidden(l) | Output(l) => l.update_weights(),
        }
    }

    /// The neurons of this layer, empty for the `Input` layer.
    pub fn neurons(&self) -> &[crate::arch::Neuron] {
        match self {
            Input(_) => &[],
            Hidden(l) | Output(l) => l.neurons(),
        }
    }
}
