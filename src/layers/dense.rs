use core::fmt::Debug;

use ndarray::linalg::general_mat_mul;
use ndarray::{Array, Array1, Array2, ArrayView2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

/// Fully connected affine layer, `z = x · w + b`. Any nonlinearity is applied
/// by the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    pub w: Array2<f64>,
    pub b: Array1<f64>,
}

/// Gradient buffers shaped like the layer they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseGrad {
    pub w: Array2<f64>,
    pub b: Array1<f64>,
}

impl DenseGrad {
    pub fn zeros(d_in: usize, d_out: usize) -> DenseGrad {
        DenseGrad {
            w: Array2::zeros((d_in, d_out)),
            b: Array::zeros(d_out),
        }
    }
}

impl Dense {
    /// Weights drawn iid from `Uniform(-scale, scale)`, biases zeroed.
    pub fn new<R: Rng + ?Sized>(d_in: usize, d_out: usize, scale: f64, rng: &mut R) -> Dense {
        Dense {
            w: Array2::random_using((d_in, d_out), Uniform::new(-scale, scale), rng),
            b: Array::zeros(d_out),
        }
    }

    pub fn d_in(&self) -> usize {
        self.w.nrows()
    }

    pub fn d_out(&self) -> usize {
        self.w.ncols()
    }

    pub fn affine_into(&self, x: ArrayView2<f64>, z: &mut Array2<f64>) {
        general_mat_mul(1., &x, &self.w, 0., z);
        *z += &self.b;
    }

    /// `grad.w = xᵀ · grad_z + reg · w`, `grad.b = Σ_i grad_z[i]`.
    pub fn backward_into(
        &self,
        x: ArrayView2<f64>,
        grad_z: ArrayView2<f64>,
        reg: f64,
        grad: &mut DenseGrad,
    ) {
        general_mat_mul(1., &x.t(), &grad_z, 0., &mut grad.w);
        grad.w.scaled_add(reg, &self.w);

        grad.b.fill(0.);
        for row in grad_z.rows() {
            grad.b += &row;
        }
    }

    /// Gradient with respect to the layer input, `grad_z · wᵀ`.
    pub fn propagate_into(&self, grad_z: ArrayView2<f64>, grad_input: &mut Array2<f64>) {
        general_mat_mul(1., &grad_z, &self.w.t(), 0., grad_input);
    }

    pub fn descend(&mut self, grad: &DenseGrad, step_size: f64) {
        self.w.scaled_add(-step_size, &grad.w);
        self.b.scaled_add(-step_size, &grad.b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::{rngs::StdRng, SeedableRng};

    fn layer() -> Dense {
        Dense {
            w: array![[1., -1., 0.5], [2., 0., -0.5]],
            b: array![0.5, 0.25, -0.25],
        }
    }

    #[test]
    fn init_is_small_with_zero_bias() {
        let mut rng = StdRng::seed_from_u64(7);
        let d = Dense::new(2, 5, 0.01, &mut rng);
        assert_eq!(d.w.dim(), (2, 5));
        assert!(d.w.iter().all(|w| w.abs() <= 0.01));
        assert!(d.w.iter().any(|w| *w != 0.));
        assert_eq!(d.b, Array1::<f64>::zeros(5));
    }

    #[test]
    fn affine() {
        let x = array![[1., 1.], [0., 2.]];
        let mut z = Array2::zeros((2, 3));
        layer().affine_into(x.view(), &mut z);
        assert_eq!(z, array![[3.5, -0.75, -0.25], [4.5, 0.25, -1.25]]);
    }

    #[test]
    fn backward_adds_weight_decay() {
        let l = layer();
        let x = array![[1., 0.], [0., 1.]];
        let g = array![[1., 0., 0.], [0., 0., 2.]];
        let mut grad = DenseGrad::zeros(2, 3);
        l.backward_into(x.view(), g.view(), 0.5, &mut grad);
        assert_eq!(grad.w, array![[1.5, -0.5, 0.25], [1., 0., 1.75]]);
        assert_eq!(grad.b, array![1., 0., 2.]);

        let mut input = Array2::zeros((2, 2));
        l.propagate_into(g.view(), &mut input);
        assert_eq!(input, array![[1., 2.], [1., -1.]]);
    }

    #[test]
    fn descend_moves_against_gradient() {
        let mut l = layer();
        let grad = DenseGrad {
            w: Array2::ones((2, 3)),
            b: Array1::ones(3),
        };
        l.descend(&grad, 0.5);
        assert_eq!(l.w, array![[0.5, -1.5, 0.], [1.5, -0.5, -1.]]);
        assert_eq!(l.b, array![0., -0.25, -0.75]);
    }
}
