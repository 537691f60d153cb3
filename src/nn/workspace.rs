use ndarray::Array2;

use super::types::{Forward, Gradients};

/// Buffers reused by every training call. Gradients are sized once; the
/// per-point buffers are reallocated only when the batch size changes.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub forward: Forward,
    pub d_scores: Array2<f64>,
    pub d_hidden: Array2<f64>,
    pub grads: Gradients,
    hidden_size: usize,
    num_classes: usize,
}

impl Workspace {
    pub fn new(input_dim: usize, hidden_size: usize, num_classes: usize) -> Workspace {
        Workspace {
            forward: Forward::zeros(0, hidden_size, num_classes),
            d_scores: Array2::zeros((0, num_classes)),
            d_hidden: Array2::zeros((0, hidden_size)),
            grads: Gradients::zeros(input_dim, hidden_size, num_classes),
            hidden_size,
            num_classes,
        }
    }

    pub fn fit(&mut self, n: usize) {
        if self.forward.len() == n {
            return;
        }

        self.forward = Forward::zeros(n, self.hidden_size, self.num_classes);
        self.d_scores = Array2::zeros((n, self.num_classes));
        self.d_hidden = Array2::zeros((n, self.hidden_size));
    }
}
