use ndarray::{ArrayView1, ArrayView2};

/// Index of the first maximal entry. Ties resolve to the lowest index so
/// measured accuracy is reproducible.
pub fn argmax(d: ArrayView1<f64>) -> usize {
    let mut max_ix = 0;
    let mut max = f64::NEG_INFINITY;

    for (i, v) in d.iter().enumerate() {
        if *v > max {
            max = *v;
            max_ix = i;
        }
    }

    max_ix
}

pub fn argmax_rows(scores: ArrayView2<f64>) -> Vec<usize> {
    scores.rows().into_iter().map(argmax).collect()
}
