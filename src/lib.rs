pub mod cli;
pub mod error;
pub mod league;
pub mod pipeline;
pub mod players;
pub mod snapshot;

pub use error::{AppErr, Result};
