use ndarray::{Array2, ArrayView2};

use crate::error::{BatchFault, NetworkError, Result};

/// Index-aligned points and labels. One point per row of `points`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: Array2<f64>,
    labels: Vec<usize>,
    num_classes: usize,
}

impl Dataset {
    pub fn new(points: Array2<f64>, labels: Vec<usize>, num_classes: usize) -> Result<Dataset> {
        if points.nrows() != labels.len() {
            return Err(NetworkError::InvalidBatch(BatchFault::LengthMismatch {
                points: points.nrows(),
                labels: labels.len(),
            }));
        }

        if let Some((index, &label)) = labels.iter().enumerate().find(|(_, &l)| l >= num_classes) {
            return Err(NetworkError::InvalidBatch(BatchFault::LabelOutOfRange {
                index,
                label,
                num_classes,
            }));
        }

        Ok(Dataset {
            points,
            labels,
            num_classes,
        })
    }

    /// Builds a dataset from one `Vec` per point. Every row must have the
    /// same length as the first.
    pub fn from_rows(rows: Vec<Vec<f64>>, labels: Vec<usize>, num_classes: usize) -> Result<Dataset> {
        let dim = rows.first().map(|r| r.len()).unwrap_or(0);

        if let Some(row) = rows.iter().find(|r| r.len() != dim) {
            return Err(NetworkError::DimensionMismatch {
                expected: dim,
                got: row.len(),
            });
        }

        let n = rows.len();
        let flat = rows.into_iter().flatten().collect::<Vec<f64>>();
        let points = Array2::from_shape_vec((n, dim), flat)
            .map_err(|e| NetworkError::config(format!("cannot shape points: {e}")))?;

        Dataset::new(points, labels, num_classes)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    pub fn points(&self) -> ArrayView2<f64> {
        self.points.view()
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_classes];
        for &label in self.labels.iter() {
            counts[label] += 1;
        }
        counts
    }
}
