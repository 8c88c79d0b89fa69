mod dense;
mod input;
mod layer;

pub use dense::Dense;
pub use input::Input;
pub use layer::Layer;
