mod network;
pub mod types;
mod workspace;

pub use network::Network;
pub use types::{Forward, Gradients, Parameters, Report};
