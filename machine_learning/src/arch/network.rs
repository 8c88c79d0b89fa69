use ndarray::{Array1, ArrayView1};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

use super::{
    NetworkParams,
    layers::{Dense, Layer},
};
use crate::{
    MlErr, Result,
    dataset::Sample,
    training::{BatchTrainer, Evaluation, ProgressSink, SuccessCriterion, TrainingResult},
};

/// The bounds of the uniform distribution new parameters are drawn from.
const INIT_RANGE: (f64, f64) = (-2., 2.);

/// A fully connected feed-forward network: an `Input` layer, zero or more `Hidden` layers
/// and an `Output` layer.
///
/// Neurons cache the values of the last forward pass, a network must be owned by a single
/// thread while it's being used.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "NetworkState", into = "NetworkState")]
pub struct Network {
    layers: Vec<Layer>,
    base_learning_rate: f64,
    learning_rate: f64,
    max_depth: usize,
}

/// Everything needed to rebuild a `Network` without drawing new random parameters.
#[derive(Clone, Serialize, Deserialize)]
struct NetworkState {
    layers: Vec<Layer>,
    base_learning_rate: f64,
    learning_rate: f64,
    max_depth: usize,
}

impl TryFrom<NetworkState> for Network {
    type Error = MlErr;

    fn try_from(state: NetworkState) -> Result<Self> {
        let mut network =
            Self::from_layers(state.layers, state.base_learning_rate, state.max_depth)?;
        network.learning_rate = state.learning_rate;
        Ok(network)
    }
}

impl From<Network> for NetworkState {
    fn from(network: Network) -> Self {
        Self {
            layers: network.layers,
            base_learning_rate: network.base_learning_rate,
            learning_rate: network.learning_rate,
            max_depth: network.max_depth,
        }
    }
}

impl Network {
    /// Creates a new `Network` with random parameters.
    ///
    /// # Arguments
    /// * `params` - The network's hyperparameters.
    /// * `rng` - A random number generator.
    ///
    /// # Errors
    /// `MlErr::InvalidTopology` if there are less than two layers or any width is zero.
    pub fn new<R: Rng>(params: &NetworkParams, rng: &mut R) -> Result<Self> {
        Self::validate_params(params)?;

        let (low, high) = INIT_RANGE;
        let distribution = Uniform::new(low, high)?;

        let mut layers = Vec::with_capacity(params.layers);
        layers.push(Layer::input(params.inputs));

        let mut fan_in = params.inputs;
        for _ in 0..params.hidden_layers() {
            let dim = (fan_in, params.neurons_per_layer);
            layers.push(Layer::Hidden(Dense::random(dim, &distribution, rng)));
            fan_in = params.neurons_per_layer;
        }

        let dim = (fan_in, params.outputs);
        layers.push(Layer::Output(Dense::random(dim, &distribution, rng)));

        Ok(Self {
            layers,
            base_learning_rate: params.learning_rate,
            learning_rate: params.learning_rate,
            max_depth: params.max_depth,
        })
    }

    /// Creates a new `Network` seeding its random source with `params.seed`.
    pub fn seeded(params: &NetworkParams) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(params.seed);
        Self::new(params, &mut rng)
    }

    /// Creates a new `Network` out of existing layers.
    ///
    /// # Arguments
    /// * `layers` - The layers, from input to output.
    /// * `base_learning_rate` - The base learning rate.
    /// * `max_depth` - The maximum amount of training iterations.
    ///
    /// # Errors
    /// `MlErr::InvalidTopology` if the layers aren't an `Input`, any `Hidden` and an `Output`
    /// in that order, or `MlErr::SizeMismatch` if a layer's fan-in doesn't match the size of
    /// the previous one.
    pub fn from_layers(
        layers: Vec<Layer>,
        base_learning_rate: f64,
        max_depth: usize,
    ) -> Result<Self> {
        let nlayers = layers.len();
        if nlayers < 2 {
            return Err(MlErr::InvalidTopology(format!(
                "a network needs at least 2 layers, got {nlayers}"
            )));
        }

        for (i, layer) in layers.iter().enumerate() {
            let well_placed = match layer {
                Layer::Input(_) => i == 0,
                Layer::Hidden(_) => i > 0 && i < nlayers - 1,
                Layer::Output(_) => i == nlayers - 1,
            };

            if !well_placed {
                return Err(MlErr::InvalidTopology(format!("layer {i} is out of place")));
            }
        }

        for pair in layers.windows(2) {
            if pair[1].fan_in() != pair[0].size() {
                return Err(MlErr::SizeMismatch {
                    a: "layer fan-in",
                    b: "previous layer size",
                    got: pair[1].fan_in(),
                    expected: pair[0].size(),
                });
            }
        }

        Ok(Self {
            layers,
            base_learning_rate,
            learning_rate: base_learning_rate,
            max_depth,
        })
    }

    fn validate_params(params: &NetworkParams) -> Result<()> {
        if params.layers < 2 {
            return Err(MlErr::InvalidTopology(format!(
                "a network needs at least 2 layers, got {}",
                params.layers
            )));
        }

        if params.inputs == 0 || params.outputs == 0 {
            return Err(MlErr::InvalidTopology(
                "input and output widths must be positive".to_string(),
            ));
        }

        if params.hidden_layers() > 0 && params.neurons_per_layer == 0 {
            return Err(MlErr::InvalidTopology(
                "hidden layers must have at least one neuron".to_string(),
            ));
        }

        Ok(())
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `x` - The input vector.
    ///
    /// # Returns
    /// The prediction for the given input or an error if the input has the wrong width.
    pub fn forward(&mut self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        let mut layers = self.layers.iter_mut();
        let Some(first) = layers.next() else {
            return Err(MlErr::InvalidTopology("the network has no layers".to_string()));
        };

        let mut y = first.forward(x)?;
        for layer in layers {
            y = layer.forward(y.view())?;
        }

        Ok(y)
    }

    /// Same as `forward` but over plain slices.
    pub fn predict(&mut self, x: &[f64]) -> Result<Vec<f64>> {
        self.forward(ArrayView1::from(x)).map(|y| y.to_vec())
    }

    /// Propagates `target` backward from the output layer, accumulating every neuron's
    /// deltas for the last forward pass at the current learning rate.
    pub(crate) fn backward(&mut self, target: ArrayView1<f64>) -> Result<()> {
        let learning_rate = self.learning_rate;
        let mut signal = target.to_owned();

        for layer in self.layers.iter_mut().rev() {
            match layer.compute_gradients(signal.view(), learning_rate)? {
                Some(upstream) => signal = upstream,
                None => break,
            }
        }

        Ok(())
    }

    /// Applies the deltas accumulated by every `backward` call since the last update.
    pub(crate) fn update_weights(&mut self) {
        self.layers.iter_mut().for_each(Layer::update_weights);
    }

    pub(crate) fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    /// Checks that `sample` fits the input and output widths of this network.
    pub fn check_sample(&self, sample: &Sample) -> Result<()> {
        if sample.input().len() != self.input_size() {
            return Err(MlErr::SizeMismatch {
                a: "sample input",
                b: "network input",
                got: sample.input().len(),
                expected: self.input_size(),
            });
        }

        if sample.target().len() != self.output_size() {
            return Err(MlErr::SizeMismatch {
                a: "sample target",
                b: "network output",
                got: sample.target().len(),
                expected: self.output_size(),
            });
        }

        Ok(())
    }

    /// Trains the network over the whole batch with the default `BatchTrainer`.
    ///
    /// # Arguments
    /// * `samples` - The training batch, iterated in the given order on every iteration.
    /// * `criterion` - Decides whether a prediction counts as a success.
    /// * `sink` - Receives the progress of the training.
    pub fn train_batch<C, P>(
        &mut self,
        samples: &[Sample],
        criterion: &C,
        sink: &mut P,
    ) -> Result<TrainingResult>
    where
        C: SuccessCriterion + ?Sized,
        P: ProgressSink + ?Sized,
    {
        BatchTrainer::default().train(self, samples, criterion, sink)
    }

    /// Runs a forward-only pass over `samples` and measures how the network does on them.
    pub fn evaluate<C>(&mut self, samples: &[Sample], criterion: &C) -> Result<Evaluation>
    where
        C: SuccessCriterion + ?Sized,
    {
        let mut evaluation = Evaluation::default();

        for sample in samples {
            self.check_sample(sample)?;
            let output = self.predict(sample.input())?;
            evaluation.record(&output, sample.target(), criterion);
        }

        Ok(evaluation)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::fan_in)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, Layer::size)
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn base_learning_rate(&self) -> f64 {
        self.base_learning_rate
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
