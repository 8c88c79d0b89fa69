pub mod activations;
pub mod layers;
mod network;
mod neuron;
mod params;

pub use network::Network;
pub use neuron::Neuron;
pub use params::NetworkParams;
