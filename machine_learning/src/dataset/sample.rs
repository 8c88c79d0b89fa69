use rand::{Rng, seq::SliceRandom};

/// A supervised sample: an input vector and the output expected for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    input: Vec<f64>,
    target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Self {
        Self { input, target }
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn target(&self) -> &[f64] {
        &self.target
    }

    /// Shuffles `samples` in place, the training loop keeps whatever order it's given.
    pub fn shuffle<R: Rng>(samples: &mut [Self], rng: &mut R) {
        samples.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn seeded_shuffles_are_reproducible() {
        let samples: Vec<_> = (0..20).map(|i| Sample::new(vec![i as f64], vec![])).collect();

        let mut a = samples.clone();
        let mut b = samples.clone();
        Sample::shuffle(&mut a, &mut StdRng::seed_from_u64(3));
        Sample::shuffle(&mut b, &mut StdRng::seed_from_u64(3));

        assert_eq!(a, b);
        assert_ne!(a, samples);
    }
}
