/// Decides whether a prediction counts as a success.
pub trait SuccessCriterion {
    /// # Arguments
    /// * `predicted` - The raw output of the network.
    /// * `expected` - The target output.
    fn is_success(&self, predicted: &[f64], expected: &[f64]) -> bool;
}

impl<F> SuccessCriterion for F
where
    F: Fn(&[f64], &[f64]) -> bool,
{
    fn is_success(&self, predicted: &[f64], expected: &[f64]) -> bool {
        self(predicted, expected)
    }
}

/// Succeeds when every output is strictly closer than `max_error` to its target.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    pub max_error: f64,
}

impl Tolerance {
    pub fn new(max_error: f64) -> Self {
        Self { max_error }
    }
}

impl SuccessCriterion for Tolerance {
    fn is_success(&self, predicted: &[f64], expected: &[f64]) -> bool {
        predicted.len() == expected.len()
            && predicted
                .iter()
                .zip(expected)
                .all(|(p, e)| (p - e).abs() < self.max_error)
    }
}
