mod normalization;
mod sample;

pub use normalization::{FeatureStats, MISSING, OUTLIER_THRESHOLD, normalize};
pub use sample::Sample;
