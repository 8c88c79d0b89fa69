use ndarray::{Array1, ArrayView1};
use rand::Rng;
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

use crate::{MlErr, Result, arch::Neuron};

/// A fully connected layer of sigmoid neurons.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dense {
    fan_in: usize,
    neurons: Vec<Neuron>,
}

impl Dense {
    /// Creates a new `Dense` layer out of already built neurons.
    ///
    /// # Arguments
    /// * `fan_in` - The amount of inputs every neuron receives.
    /// * `neurons` - The neurons of the layer, in order.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if any neuron has a different amount of weights than `fan_in`.
    pub fn new(fan_in: usize, neurons: Vec<Neuron>) -> Result<Self> {
        if let Some(neuron) = neurons.iter().find(|n| n.fan_in() != fan_in) {
            return Err(MlErr::SizeMismatch {
                a: "neuron weights",
                b: "layer fan-in",
                got: neuron.fan_in(),
                expected: fan_in,
            });
        }

        Ok(Self { fan_in, neurons })
    }

    /// Creates a new `Dense` layer of `dim.1` neurons with `dim.0` random weights each.
    pub fn random<R: Rng>(dim: (usize, usize), distribution: &Uniform<f64>, rng: &mut R) -> Self {
        let (fan_in, size) = dim;
        let neurons = (0..size)
            .map(|_| Neuron::random(fan_in, distribution, rng))
            .collect();

        Self { fan_in, neurons }
    }

    pub fn fan_in(&self) -> usize {
        self.fan_in
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn forward(&mut self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.neurons
            .iter_mut()
            .map(|neuron| neuron.forward(x))
            .collect::<Result<Vec<_>>>()
            .map(Array1::from)
    }

    /// Computes the error handed to the previous layer as the sum of every neuron's
    /// per-weight contribution.
    ///
    /// # Arguments
    /// * `errors` - The error on each neuron's output, in order.
    /// * `learning_rate` - The network's current learning rate.
    pub fn backward<I>(&mut self, errors: I, learning_rate: f64) -> Result<Array1<f64>>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut upstream = Array1::zeros(self.fan_in);

        for (neuron, error) in self.neurons.iter_mut().zip(errors) {
            upstream += &neuron.compute_gradient(error, learning_rate)?;
        }

        Ok(upstream)
    }

    /// Checks that `signal` carries one value per neuron.
    pub fn check_signal(&self, signal: ArrayView1<f64>, what: &'static str) -> Result<()> {
        if signal.len() != self.neurons.len() {
            return Err(MlErr::SizeMismatch {
                a: what,
                b: "layer neurons",
                got: signal.len(),
                expected: self.neurons.len(),
            });
        }

        Ok(())
    }

    /// The outputs cached by the last forward pass.
    pub fn outputs(&self) -> impl Iterator<Item = f64> + '_ {
        self.neurons.iter().map(Neuron::output)
    }

    pub fn update_weights(&mut self) {
        self.neurons.iter_mut().for_each(Neuron::update_weights);
    }
}
