use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::f;
use crate::layers::{Dense, DenseGrad};
use crate::loss::{l2_penalty, SoftmaxCrossEntropy};

/// Intermediate tensors of one forward pass over `N` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Forward {
    /// `N × H`, `x · W1 + b1`.
    pub pre_activation: Array2<f64>,
    /// `N × H`, ReLU of the pre-activation.
    pub hidden: Array2<f64>,
    /// `N × C`, `hidden · W2 + b2`.
    pub logits: Array2<f64>,
    /// `N × C`, row-wise softmax of the logits.
    pub probabilities: Array2<f64>,
}

impl Forward {
    pub fn zeros(n: usize, hidden_size: usize, num_classes: usize) -> Forward {
        Forward {
            pre_activation: Array2::zeros((n, hidden_size)),
            hidden: Array2::zeros((n, hidden_size)),
            logits: Array2::zeros((n, num_classes)),
            probabilities: Array2::zeros((n, num_classes)),
        }
    }

    pub fn len(&self) -> usize {
        self.logits.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Predicted class per point, first maximal logit wins.
    pub fn classes(&self) -> Vec<usize> {
        f::argmax_rows(self.logits.view())
    }
}

/// The four trainable tensors. `hidden` holds `W1`/`b1`, `output` holds `W2`/`b2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub hidden: Dense,
    pub output: Dense,
}

impl Parameters {
    pub fn input_dim(&self) -> usize {
        self.hidden.d_in()
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden.d_out()
    }

    pub fn num_classes(&self) -> usize {
        self.output.d_out()
    }

    pub fn validate(&self) -> Result<()> {
        let (d, h) = self.hidden.w.dim();
        let (h2, c) = self.output.w.dim();

        if d == 0 || h == 0 || c == 0 {
            return Err(NetworkError::config(format!(
                "every dimension must be positive, got input_dim={d} hidden_size={h} num_classes={c}"
            )));
        }
        if h2 != h {
            return Err(NetworkError::config(format!(
                "W2 has {h2} rows but the hidden layer has {h} units"
            )));
        }
        if self.hidden.b.len() != h {
            return Err(NetworkError::config(format!(
                "b1 has length {} but the hidden layer has {h} units",
                self.hidden.b.len()
            )));
        }
        if self.output.b.len() != c {
            return Err(NetworkError::config(format!(
                "b2 has length {} but there are {c} classes",
                self.output.b.len()
            )));
        }

        Ok(())
    }

    pub(crate) fn forward_into(&self, points: ArrayView2<f64>, cache: &mut Forward) {
        self.hidden.affine_into(points, &mut cache.pre_activation);
        cache
            .hidden
            .zip_mut_with(&cache.pre_activation, |h, z| *h = f::relu(*z));
        self.output.affine_into(cache.hidden.view(), &mut cache.logits);
        SoftmaxCrossEntropy::softmax_into(cache.logits.view(), &mut cache.probabilities);
    }

    /// Loss and accuracy of these parameters on an already computed forward pass.
    pub(crate) fn measure(&self, cache: &Forward, labels: &[usize], reg: f64) -> Report {
        let data_loss = SoftmaxCrossEntropy::data_loss(cache.probabilities.view(), labels);
        let reg_loss = l2_penalty(reg, &[self.hidden.w.view(), self.output.w.view()]);

        Report {
            loss: data_loss + reg_loss,
            accuracy: f::accuracy(cache.logits.view(), labels),
        }
    }
}

/// Gradients of the total loss with respect to each parameter tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub hidden: DenseGrad,
    pub output: DenseGrad,
}

impl Gradients {
    pub fn zeros(input_dim: usize, hidden_size: usize, num_classes: usize) -> Gradients {
        Gradients {
            hidden: DenseGrad::zeros(input_dim, hidden_size),
            output: DenseGrad::zeros(hidden_size, num_classes),
        }
    }
}

/// Quality of the parameters that entered a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub loss: f64,
    pub accuracy: f64,
}
