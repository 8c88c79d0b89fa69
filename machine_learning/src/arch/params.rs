use serde::{Deserialize, Serialize};

/// The hyperparameters a `Network` is built from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    /// The width of the input vectors.
    pub inputs: usize,
    /// The width of the output vectors.
    pub outputs: usize,
    /// The base learning rate of the network.
    pub learning_rate: f64,
    /// The total amount of layers, input and output layers included.
    pub layers: usize,
    /// The amount of neurons of every hidden layer.
    pub neurons_per_layer: usize,
    /// The maximum amount of training iterations.
    pub max_depth: usize,
    /// The seed of the random source used to initialize the network's parameters.
    pub seed: u64,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            inputs: 18,
            outputs: 8,
            learning_rate: 0.002,
            layers: 3,
            neurons_per_layer: 18,
            max_depth: 2000,
            seed: 0,
        }
    }
}

impl NetworkParams {
    /// The amount of hidden layers these parameters describe.
    pub fn hidden_layers(&self) -> usize {
        self.layers.saturating_sub(2)
    }
}
