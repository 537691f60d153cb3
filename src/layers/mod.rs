mod dense;

pub use dense::{Dense, DenseGrad};
