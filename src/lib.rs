//! A one-hidden-layer softmax classifier for 2-D points, trained online with
//! full-batch gradient descent and L2 weight decay.

pub mod config;
pub mod data;
mod error;
pub mod f;
pub mod layers;
pub mod loss;
pub mod nn;
pub mod optimizers;

pub use config::{Config, NetworkConfig};
pub use data::{generate, Dataset, DatasetConfig, Grid, Pattern};
pub use error::{BatchFault, NetworkError, Result};
pub use nn::{Forward, Network, Report};
pub use optimizers::{FullBatchGradientDescent, Hyper};
