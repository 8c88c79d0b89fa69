use serde::{Deserialize, Serialize};

use crate::{OrchestratorError, Result};

/// An inclusive range of integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// The amount of integers in the range, `None` if it doesn't fit in a `usize`.
    pub fn len(&self) -> Option<usize> {
        match self.max.checked_sub(self.min) {
            Some(span) => span.checked_add(1),
            None => Some(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }
}

/// An inclusive range of reals walked with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl StepRange {
    /// Tolerance for rounding errors when deciding whether `end` is reached.
    const EPSILON: f64 = 1e-9;

    /// The amount of values in the range, `None` if it doesn't fit in a `usize`.
    pub fn len(&self) -> Option<usize> {
        if self.step <= 0. || self.end < self.start {
            return Some(0);
        }

        let steps = ((self.end - self.start) / self.step + Self::EPSILON).floor();
        if !steps.is_finite() || steps >= usize::MAX as f64 {
            return None;
        }

        (steps as usize).checked_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// The `i`th value of the range, computed from `start` so errors don't accumulate.
    pub fn nth(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }
}

/// The hyperparameter space a search walks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub learning_rate: StepRange,
    /// Total layer counts, input and output layers included.
    pub layers: Bounds,
    pub neurons_per_layer: Bounds,
    /// Every grid point draws its maximum depth from `[min, max)`, or takes `min` when
    /// both bounds are equal.
    pub max_depth: Bounds,
    pub inputs: usize,
    pub outputs: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            learning_rate: StepRange {
                start: 0.0005,
                end: 0.005,
                step: 0.0005,
            },
            layers: Bounds::new(3, 4),
            neurons_per_layer: Bounds::new(18, 22),
            max_depth: Bounds::new(1000, 1000),
            inputs: 18,
            outputs: 8,
        }
    }
}

impl GridConfig {
    /// The amount of points in the grid, `None` if it doesn't fit in a `usize`.
    pub fn size(&self) -> Option<usize> {
        self.learning_rate
            .len()?
            .checked_mul(self.layers.len()?)?
            .checked_mul(self.neurons_per_layer.len()?)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(OrchestratorError::InvalidConfig(msg.into()));

        let rate = &self.learning_rate;
        if !(rate.step > 0.) || !(rate.start > 0.) || rate.end < rate.start {
            return invalid("learning rates need a positive start and step, and start <= end");
        }

        if self.layers.is_empty() || self.neurons_per_layer.is_empty() || self.max_depth.is_empty()
        {
            return invalid("every bound must have min <= max");
        }

        if self.layers.min < 2 {
            return invalid("networks need at least 2 layers");
        }

        if self.layers.max > 2 && self.neurons_per_layer.min == 0 {
            return invalid("hidden layers must have at least one neuron");
        }

        if self.inputs == 0 || self.outputs == 0 {
            return invalid("input and output widths must be positive");
        }

        if self.size().is_none() {
            return invalid("the grid has too many points");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_a_hundred_points() {
        let grid = GridConfig::default();
        assert_eq!(grid.learning_rate.len(), Some(10));
        assert_eq!(grid.layers.len(), Some(2));
        assert_eq!(grid.neurons_per_layer.len(), Some(5));
        assert_eq!(grid.size(), Some(100));
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn step_range_reaches_its_end_despite_rounding() {
        let range = StepRange {
            start: 0.1,
            end: 0.3,
            step: 0.1,
        };
        assert_eq!(range.len(), Some(3));
        assert!((range.nth(2) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn rejects_empty_dimensions() {
        let mut grid = GridConfig::default();
        grid.layers = Bounds::new(4, 3);
        assert!(grid.validate().is_err());

        let mut grid = GridConfig::default();
        grid.learning_rate.step = 0.;
        assert!(grid.validate().is_err());

        let mut grid = GridConfig::default();
        grid.layers = Bounds::new(1, 3);
        assert!(grid.validate().is_err());
    }

    #[test]
    fn bounds_covering_every_usize_have_no_length() {
        assert_eq!(Bounds::new(0, usize::MAX).len(), None);
        assert_eq!(Bounds::new(1, usize::MAX).len(), Some(usize::MAX));
        assert_eq!(Bounds::new(4, 3).len(), Some(0));
    }

    #[test]
    fn rejects_grids_too_large_to_count() {
        let grid: GridConfig = serde_json::from_str(
            r#"{ "neurons_per_layer": { "min": 18, "max": 18446744073709551615 } }"#,
        )
        .unwrap();
        assert_eq!(grid.size(), None);
        assert!(matches!(
            grid.validate(),
            Err(OrchestratorError::InvalidConfig(_))
        ));

        let grid: GridConfig = serde_json::from_str(
            r#"{ "learning_rate": { "start": 1e-300, "end": 1e300, "step": 1e-300 } }"#,
        )
        .unwrap();
        assert_eq!(grid.learning_rate.len(), None);
        assert!(matches!(
            grid.validate(),
            Err(OrchestratorError::InvalidConfig(_))
        ));
    }
}
