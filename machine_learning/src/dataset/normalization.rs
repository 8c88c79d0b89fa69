use serde::{Deserialize, Serialize};

use crate::{MlErr, Result};

/// The raw value marking a feature as missing.
pub const MISSING: f64 = -1.;

/// Raw values above this are left out when fitting the feature statistics.
pub const OUTLIER_THRESHOLD: f64 = 20000.;

/// Standardizes `values` against per-feature `mean` and `stdev`.
///
/// Missing values (`MISSING`) are replaced by the mean of the standardized values of the
/// same vector. If every value is missing they all stay `NaN`. A zero `stdev` yields
/// non-finite values, it's up to the caller to avoid constant features.
///
/// # Errors
/// `MlErr::SizeMismatch` if `mean` or `stdev` don't have one value per feature.
pub fn normalize(values: &[f64], mean: &[f64], stdev: &[f64]) -> Result<Vec<f64>> {
    for (what, stats) in [("feature means", mean), ("feature deviations", stdev)] {
        if stats.len() != values.len() {
            return Err(MlErr::SizeMismatch {
                a: what,
                b: "values",
                got: stats.len(),
                expected: values.len(),
            });
        }
    }

    let mut missing = Vec::new();
    let mut sum = 0.;
    let mut normalized: Vec<_> = values
        .iter()
        .zip(mean.iter().zip(stdev))
        .enumerate()
        .map(|(i, (&v, (&m, &s)))| {
            if v == MISSING {
                missing.push(i);
                return f64::NAN;
            }

            let z = (v - m) / s;
            sum += z;
            z
        })
        .collect();

    if !missing.is_empty() {
        let present = values.len() - missing.len();
        let fallback = sum / present as f64;

        for i in missing {
            normalized[i] = fallback;
        }
    }

    Ok(normalized)
}

/// Per-feature mean and standard deviation of a dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub means: Vec<f64>,
    pub stdev: Vec<f64>,
}

impl FeatureStats {
    /// Computes the population mean and standard deviation of every feature of `rows`,
    /// ignoring missing values and outliers.
    ///
    /// # Arguments
    /// * `rows` - The raw feature vectors, all of the same width.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if the rows don't all have the same width.
    pub fn fit<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());

        if let Some(row) = rows.iter().find(|r| r.as_ref().len() != width) {
            return Err(MlErr::SizeMismatch {
                a: "row",
                b: "first row",
                got: row.as_ref().len(),
                expected: width,
            });
        }

        let usable = |v: f64| v != MISSING && v <= OUTLIER_THRESHOLD;

        let mut sums = vec![0.; width];
        let mut counts = vec![0usize; width];
        for row in rows {
            for (i, &v) in row.as_ref().iter().enumerate() {
                if usable(v) {
                    sums[i] += v;
                    counts[i] += 1;
                }
            }
        }

        let means: Vec<_> = sums
            .iter()
            .zip(&counts)
            .map(|(&s, &c)| s / c as f64)
            .collect();

        let mut squares = vec![0.; width];
        for row in rows {
            for (i, &v) in row.as_ref().iter().enumerate() {
                if usable(v) {
                    squares[i] += (v - means[i]).powi(2);
                }
            }
        }

        let stdev = squares
            .iter()
            .zip(&counts)
            .map(|(&s, &c)| (s / c as f64).sqrt())
            .collect();

        Ok(Self { means, stdev })
    }

    /// Standardizes `values` with these statistics, see `normalize`.
    pub fn normalize(&self, values: &[f64]) -> Result<Vec<f64>> {
        normalize(values, &self.means, &self.stdev)
    }
}
