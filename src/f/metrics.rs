use ndarray::ArrayView2;

use super::argmax;

/// Fraction of rows whose highest score lands on the label.
pub fn accuracy(scores: ArrayView2<f64>, labels: &[usize]) -> f64 {
    if labels.is_empty() {
        return 0.;
    }

    let correct = scores
        .rows()
        .into_iter()
        .zip(labels.iter())
        .filter(|(row, label)| argmax(row.view()) == **label)
        .count();

    correct as f64 / labels.len() as f64
}
