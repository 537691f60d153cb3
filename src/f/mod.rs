pub mod activation;
pub mod metrics;
pub mod shape;

pub use activation::*;
pub use metrics::*;
pub use shape::*;
