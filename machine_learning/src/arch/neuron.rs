use ndarray::{Array1, ArrayView1};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use super::activations::{sigmoid, sigmoid_prime};
use crate::{MlErr, Result};

/// A sigmoid unit with its own weights, bias and the deltas accumulated over a batch.
///
/// The last input and output are cached on `forward` for the backward pass, so a neuron
/// holds per-call state and is not meant to be shared between concurrent passes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "NeuronParams", into = "NeuronParams")]
pub struct Neuron {
    weights: Array1<f64>,
    bias: f64,

    // Batch accumulators
    deltas: Array1<f64>,
    delta_bias: f64,

    // Forward metadata
    input: Option<Array1<f64>>,
    output: f64,
}

/// The persistent part of a `Neuron`.
#[derive(Clone, Serialize, Deserialize)]
struct NeuronParams {
    weights: Array1<f64>,
    bias: f64,
}

impl From<NeuronParams> for Neuron {
    fn from(params: NeuronParams) -> Self {
        Self::new(params.weights, params.bias)
    }
}

impl From<Neuron> for NeuronParams {
    fn from(neuron: Neuron) -> Self {
        Self {
            weights: neuron.weights,
            bias: neuron.bias,
        }
    }
}

impl Neuron {
    /// Creates a new `Neuron` with the given parameters and no pending deltas.
    ///
    /// # Arguments
    /// * `weights` - One weight per input.
    /// * `bias` - The bias added to the weighted sum.
    pub fn new(weights: Array1<f64>, bias: f64) -> Self {
        Self {
            deltas: Array1::zeros(weights.len()),
            delta_bias: 0.,
            input: None,
            output: 0.,
            weights,
            bias,
        }
    }

    /// Creates a new `Neuron` sampling its weights and bias from `distribution`.
    ///
    /// # Arguments
    /// * `fan_in` - The amount of inputs feeding the neuron.
    /// * `distribution` - The distribution the parameters are drawn from.
    /// * `rng` - A random number generator.
    pub fn random<R: Rng>(fan_in: usize, distribution: &Uniform<f64>, rng: &mut R) -> Self {
        let weights = Array1::from_shape_fn(fan_in, |_| distribution.sample(rng));
        let bias = distribution.sample(rng);
        Self::new(weights, bias)
    }

    /// Computes the activation of this neuron for `x` and caches both for the backward pass.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if `x` doesn't have one value per weight.
    pub fn forward(&mut self, x: ArrayView1<f64>) -> Result<f64> {
        if x.len() != self.weights.len() {
            return Err(MlErr::SizeMismatch {
                a: "neuron input",
                b: "neuron weights",
                got: x.len(),
                expected: self.weights.len(),
            });
        }

        self.output = sigmoid(self.weights.dot(&x) + self.bias);
        self.input = Some(x.to_owned());
        Ok(self.output)
    }

    /// Accumulates this neuron's deltas for the error signal of the last forward pass.
    ///
    /// # Arguments
    /// * `error` - The error propagated from downstream onto this neuron's output.
    /// * `learning_rate` - The owning network's current learning rate.
    ///
    /// # Returns
    /// Each weight's share of the error (`weight * gradient`), to be summed across the layer
    /// by the caller and handed upstream.
    pub fn compute_gradient(&mut self, error: f64, learning_rate: f64) -> Result<Array1<f64>> {
        let input = self.input.as_ref().ok_or(MlErr::MissingForwardPass)?;
        let gradient = sigmoid_prime(self.output) * error;

        self.deltas.scaled_add(learning_rate * gradient, input);
        self.delta_bias += learning_rate * gradient;

        Ok(&self.weights * gradient)
    }

    /// Applies the accumulated deltas and resets them.
    pub fn update_weights(&mut self) {
        self.weights += &self.deltas;
        self.bias += self.delta_bias;

        self.deltas.fill(0.);
        self.delta_bias = 0.;
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// The output cached by the last `forward` call.
    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    /// The weight and bias deltas accumulated since the last update.
    pub fn pending_deltas(&self) -> (ArrayView1<'_, f64>, f64) {
        (self.deltas.view(), self.delta_bias)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn forward_stays_in_the_open_unit_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        let distribution = Uniform::new(-2., 2.).unwrap();

        for _ in 0..100 {
            let mut neuron = Neuron::random(5, &distribution, &mut rng);
            let x = Array1::from_shape_fn(5, |_| rng.random_range(-10.0..10.0));
            let a = neuron.forward(x.view()).unwrap();
            assert!(a > 0. && a < 1.);
        }
    }

    #[test]
    fn random_parameters_are_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let distribution = Uniform::new(-2., 2.).unwrap();
        let neuron = Neuron::random(50, &distribution, &mut rng);

        assert!(neuron.weights().iter().all(|w| (-2.0..2.0).contains(w)));
        assert!((-2.0..2.0).contains(&neuron.bias()));
    }

    #[test]
    fn forward_rejects_inputs_of_the_wrong_size() {
        let mut neuron = Neuron::new(array![1., 2.], 0.);
        let err = neuron.forward(array![1., 2., 3.].view()).unwrap_err();
        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                got: 3,
                expected: 2,
                ..
            }
        ));
    }

    #[test]
    fn gradient_before_forward_fails() {
        let mut neuron = Neuron::new(array![1.], 0.);
        assert!(matches!(
            neuron.compute_gradient(1., 0.1),
            Err(MlErr::MissingForwardPass)
        ));
    }

    #[test]
    fn compute_gradient_accumulates_and_returns_upstream_shares() {
        let mut neuron = Neuron::new(array![0.5, -1.], 0.);
        let a = neuron.forward(array![2., 1.].view()).unwrap();
        assert_eq!(a, 0.5);

        let g = 0.25 * 2.;
        let upstream = neuron.compute_gradient(2., 0.1).unwrap();
        assert_eq!(upstream, array![0.5 * g, -g]);

        neuron.compute_gradient(2., 0.1).unwrap();
        let (deltas, delta_bias) = neuron.pending_deltas();
        assert_eq!(deltas, array![2. * 0.1 * 2. * g, 2. * 0.1 * g]);
        assert_eq!(delta_bias, 2. * 0.1 * g);
    }

    #[test]
    fn update_weights_applies_and_clears_deltas() {
        let mut neuron = Neuron::new(array![0.5, -1.], 0.25);
        neuron.forward(array![2., 1.].view()).unwrap();
        neuron.compute_gradient(1., 1.).unwrap();

        let (deltas, delta_bias) = neuron.pending_deltas();
        let expected_weights = &neuron.weights() + &deltas;
        let expected_bias = neuron.bias() + delta_bias;

        neuron.update_weights();

        assert_eq!(neuron.weights(), expected_weights);
        assert_eq!(neuron.bias(), expected_bias);

        let (deltas, delta_bias) = neuron.pending_deltas();
        assert!(deltas.iter().all(|&d| d == 0.));
        assert_eq!(delta_bias, 0.);
    }
}
