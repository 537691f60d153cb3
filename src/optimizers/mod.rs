mod fbgd;
mod optimizer;

pub use fbgd::FullBatchGradientDescent;
pub use optimizer::Hyper;
