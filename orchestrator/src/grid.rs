use machine_learning::arch::NetworkParams;
use rand::Rng;

use crate::{
    OrchestratorError, Result,
    configs::{Bounds, GridConfig},
};

/// Lazily walks the Cartesian product of a `GridConfig`.
///
/// Points come out by learning rate, then layer count, then neurons per layer. Each one
/// draws its maximum depth and the seed of its network from `rng` as it's generated.
pub struct ParamGrid<R> {
    config: GridConfig,
    size: usize,
    cursor: usize,
    rng: R,
}

impl<R: Rng> ParamGrid<R> {
    /// Creates a new `ParamGrid`.
    ///
    /// # Arguments
    /// * `config` - The hyperparameter space.
    /// * `rng` - A random number generator.
    ///
    /// # Errors
    /// `OrchestratorError::InvalidConfig` if `config` is invalid.
    pub fn new(config: GridConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let size = config.size().ok_or_else(|| {
            OrchestratorError::InvalidConfig("the grid has too many points".into())
        })?;

        Ok(Self {
            config,
            size,
            cursor: 0,
            rng,
        })
    }

    fn draw_depth(&mut self) -> usize {
        let Bounds { min, max } = self.config.max_depth;
        if min >= max {
            return min;
        }

        self.rng.random_range(min..max)
    }
}

impl<R: Rng> Iterator for ParamGrid<R> {
    type Item = NetworkParams;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.size {
            return None;
        }

        // `size` fitting means every dimension does
        let neurons = self.config.neurons_per_layer.len()?;
        let layers = self.config.layers.len()?;

        let i = self.cursor;
        self.cursor += 1;

        let params = NetworkParams {
            inputs: self.config.inputs,
            outputs: self.config.outputs,
            learning_rate: self.config.learning_rate.nth(i / (neurons * layers)),
            layers: self.config.layers.min + (i / neurons) % layers,
            neurons_per_layer: self.config.neurons_per_layer.min + i % neurons,
            max_depth: self.draw_depth(),
            seed: self.rng.random(),
        };

        Some(params)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.size - self.cursor;
        (left, Some(left))
    }
}

impl<R: Rng> ExactSizeIterator for ParamGrid<R> {}
