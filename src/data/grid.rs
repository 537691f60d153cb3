use ndarray::{Array2, ArrayView2};

use crate::error::{NetworkError, Result};
use crate::nn::Network;

/// Dense lattice of points covering `[-extent, extent]²`, laid out row-major
/// with the top row (largest `y`) first.
#[derive(Debug, Clone)]
pub struct Grid {
    points: Array2<f64>,
    width: usize,
    height: usize,
}

/// Predicted class for every grid cell, row-major like the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionMap {
    pub width: usize,
    pub height: usize,
    pub classes: Vec<usize>,
}

impl DecisionMap {
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.classes[row * self.width + col]
    }
}

impl Grid {
    pub fn new(extent: f64, width: usize, height: usize) -> Result<Grid> {
        if width == 0 || height == 0 {
            return Err(NetworkError::config(format!(
                "grid must have positive size, got {width}x{height}"
            )));
        }
        if !(extent.is_finite() && extent > 0.) {
            return Err(NetworkError::config(format!(
                "grid extent must be positive and finite, got {extent}"
            )));
        }

        let mut points = Array2::zeros((width * height, 2));
        for (ix, mut point) in points.rows_mut().into_iter().enumerate() {
            let (row, col) = (ix / width, ix % width);
            point[0] = -extent + 2. * extent * col as f64 / width as f64;
            point[1] = extent - 2. * extent * row as f64 / height as f64;
        }

        Ok(Grid {
            points,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn points(&self) -> ArrayView2<f64> {
        self.points.view()
    }

    /// Classifies every cell. Only reads the network.
    pub fn classify(&self, network: &Network) -> Result<DecisionMap> {
        Ok(DecisionMap {
            width: self.width,
            height: self.height,
            classes: network.classify(self.points.view())?,
        })
    }
}
