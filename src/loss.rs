use ndarray::{Array2, ArrayView2, Zip};
use ndarray_stats::QuantileExt;

/// Softmax output paired with categorical cross-entropy against integer labels.
pub struct SoftmaxCrossEntropy;

impl SoftmaxCrossEntropy {
    /// Row-wise softmax. Each row is shifted by its max before exponentiating,
    /// which leaves the result unchanged but keeps large logits finite.
    pub fn softmax_into(logits: ArrayView2<f64>, probabilities: &mut Array2<f64>) {
        Zip::from(probabilities.rows_mut())
            .and(logits.rows())
            .for_each(|mut p, l| {
                let max = *l.max_skipnan();
                p.zip_mut_with(&l, |p, l| *p = (l - max).exp());
                let sum = p.sum();
                p.mapv_inplace(|v| v / sum);
            });
    }

    /// Mean negative log-probability of the true class. A zero probability
    /// yields an infinite loss rather than an error.
    pub fn data_loss(probabilities: ArrayView2<f64>, labels: &[usize]) -> f64 {
        let total = labels
            .iter()
            .enumerate()
            .fold(0., |a, (i, &label)| a - probabilities[[i, label]].ln());

        total / labels.len() as f64
    }

    /// `d_scores[i][c] = (p[i][c] - 1{c == label_i}) / N`
    pub fn d_into(probabilities: ArrayView2<f64>, labels: &[usize], d_scores: &mut Array2<f64>) {
        let n = labels.len() as f64;

        Zip::from(d_scores.rows_mut())
            .and(probabilities.rows())
            .and(labels)
            .for_each(|mut d, p, &label| {
                for (c, (d, p)) in d.iter_mut().zip(p.iter()).enumerate() {
                    let target = if c == label { 1. } else { 0. };
                    *d = (p - target) / n;
                }
            });
    }
}

/// `0.5 * reg * Σ w²` over every given weight matrix. Biases are never passed in.
pub fn l2_penalty(reg: f64, weights: &[ArrayView2<f64>]) -> f64 {
    weights
        .iter()
        .map(|w| 0.5 * reg * w.fold(0., |a, v| a + v * v))
        .sum()
}
