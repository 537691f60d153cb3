use log::debug;
use ndarray::{ArrayView2, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::NetworkConfig;
use crate::error::{BatchFault, NetworkError, Result};
use crate::f;
use crate::layers::Dense;
use crate::loss::SoftmaxCrossEntropy;

use super::types::{Forward, Gradients, Parameters, Report};
use super::workspace::Workspace;

/// One ReLU hidden layer followed by a softmax output, trained by full-batch
/// gradient descent with L2 weight decay.
///
/// Parameters are only ever changed by [`Network::train_step`]. Queries take
/// `&self`, so a grid can be classified between steps without disturbing
/// training.
#[derive(Debug, Clone)]
pub struct Network {
    params: Parameters,
    workspace: Workspace,
}

impl Network {
    /// Builds a network with small random weights and zero biases. Uses the
    /// configured seed when there is one.
    pub fn new(config: &NetworkConfig) -> Result<Network> {
        match config.seed {
            Some(seed) => Network::with_rng(config, &mut StdRng::seed_from_u64(seed)),
            None => Network::with_rng(config, &mut StdRng::from_entropy()),
        }
    }

    pub fn with_rng<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;

        let hidden = Dense::new(
            config.input_dim,
            config.hidden_size,
            config.init_scale,
            rng,
        );
        let output = Dense::new(
            config.hidden_size,
            config.num_classes,
            config.init_scale,
            rng,
        );

        debug!(
            "initialized network: input_dim={} hidden_size={} num_classes={}",
            config.input_dim, config.hidden_size, config.num_classes
        );

        Network::from_parameters(Parameters { hidden, output })
    }

    /// Wraps explicit parameter tensors, checking that their shapes agree.
    pub fn from_parameters(params: Parameters) -> Result<Network> {
        params.validate()?;

        let workspace = Workspace::new(
            params.input_dim(),
            params.hidden_size(),
            params.num_classes(),
        );

        Ok(Network { params, workspace })
    }

    pub fn input_dim(&self) -> usize {
        self.params.input_dim()
    }

    pub fn hidden_size(&self) -> usize {
        self.params.hidden_size()
    }

    pub fn num_classes(&self) -> usize {
        self.params.num_classes()
    }

    /// Read-only view of the current parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Forward pass over a batch of points, one point per row.
    pub fn predict(&self, points: ArrayView2<f64>) -> Result<Forward> {
        self.check_points(&points)?;

        let mut cache = Forward::zeros(points.nrows(), self.hidden_size(), self.num_classes());
        self.params.forward_into(points, &mut cache);
        Ok(cache)
    }

    /// Most likely class per point.
    pub fn classify(&self, points: ArrayView2<f64>) -> Result<Vec<usize>> {
        Ok(self.predict(points)?.classes())
    }

    /// Loss and accuracy of the current parameters, without touching them.
    pub fn evaluate(
        &self,
        points: ArrayView2<f64>,
        labels: &[usize],
        regularization: f64,
    ) -> Result<Report> {
        self.check_batch(&points, labels)?;

        let cache = self.predict(points)?;
        Ok(self.params.measure(&cache, labels, regularization))
    }

    /// Runs the backward pass and returns the gradients without applying them.
    pub fn gradients(
        &mut self,
        points: ArrayView2<f64>,
        labels: &[usize],
        regularization: f64,
    ) -> Result<Gradients> {
        self.backprop(points, labels, regularization)?;
        Ok(self.workspace.grads.clone())
    }

    /// One full-batch gradient descent update. The returned report describes
    /// the parameters as they were before the update. A rejected batch leaves
    /// every parameter untouched.
    pub fn train_step(
        &mut self,
        points: ArrayView2<f64>,
        labels: &[usize],
        step_size: f64,
        regularization: f64,
    ) -> Result<Report> {
        let report = self.backprop(points, labels, regularization)?;

        let grads = &self.workspace.grads;
        self.params.hidden.descend(&grads.hidden, step_size);
        self.params.output.descend(&grads.output, step_size);

        Ok(report)
    }

    fn backprop(
        &mut self,
        points: ArrayView2<f64>,
        labels: &[usize],
        regularization: f64,
    ) -> Result<Report> {
        self.check_batch(&points, labels)?;

        let params = &self.params;
        let ws = &mut self.workspace;
        ws.fit(points.nrows());

        params.forward_into(points, &mut ws.forward);
        let report = params.measure(&ws.forward, labels, regularization);

        SoftmaxCrossEntropy::d_into(ws.forward.probabilities.view(), labels, &mut ws.d_scores);

        params.output.backward_into(
            ws.forward.hidden.view(),
            ws.d_scores.view(),
            regularization,
            &mut ws.grads.output,
        );

        params
            .output
            .propagate_into(ws.d_scores.view(), &mut ws.d_hidden);
        Zip::from(&mut ws.d_hidden)
            .and(&ws.forward.hidden)
            .for_each(|d, &h| *d = f::relu_gate(h, *d));

        params.hidden.backward_into(
            points,
            ws.d_hidden.view(),
            regularization,
            &mut ws.grads.hidden,
        );

        Ok(report)
    }

    fn check_points(&self, points: &ArrayView2<f64>) -> Result<()> {
        if points.ncols() != self.input_dim() {
            return Err(NetworkError::DimensionMismatch {
                expected: self.input_dim(),
                got: points.ncols(),
            });
        }
        Ok(())
    }

    fn check_batch(&self, points: &ArrayView2<f64>, labels: &[usize]) -> Result<()> {
        if points.nrows() == 0 {
            return Err(NetworkError::InvalidBatch(BatchFault::Empty));
        }
        if points.nrows() != labels.len() {
            return Err(NetworkError::InvalidBatch(BatchFault::LengthMismatch {
                points: points.nrows(),
                labels: labels.len(),
            }));
        }

        self.check_points(points)?;

        let num_classes = self.num_classes();
        if let Some((index, &label)) = labels.iter().enumerate().find(|(_, &l)| l >= num_classes) {
            return Err(NetworkError::InvalidBatch(BatchFault::LabelOutOfRange {
                index,
                label,
                num_classes,
            }));
        }

        Ok(())
    }
}
