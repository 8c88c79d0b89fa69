mod grid;
mod search;

pub use grid::{Bounds, GridConfig, StepRange};
pub use search::SearchConfig;
