mod dataset;
mod generate;
mod grid;

pub use dataset::Dataset;
pub use generate::{generate, DatasetConfig, Pattern};
pub use grid::{DecisionMap, Grid};
