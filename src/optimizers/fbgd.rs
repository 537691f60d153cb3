use log::{debug, info};

use super::Hyper;
use crate::data::Dataset;
use crate::error::Result;
use crate::nn::{Network, Report};

/// Drives a [`Network`] with one full-batch update per step over the whole
/// dataset, recording the loss of every step.
pub struct FullBatchGradientDescent<'a> {
    network: &'a mut Network,
    hyper: Hyper,
    early_terminate: Box<dyn Fn(&Vec<f64>) -> bool>,
    iterations: usize,
    last: Option<Report>,
    pub losses: Vec<f64>,
}

impl FullBatchGradientDescent<'_> {
    pub fn new(network: &mut Network) -> FullBatchGradientDescent<'_> {
        FullBatchGradientDescent {
            network,
            hyper: Hyper::new(),
            early_terminate: Box::new(|_| false),
            iterations: 0,
            last: None,
            losses: vec![],
        }
    }

    pub fn override_hyper(&mut self, hyper: Hyper) -> &mut Self {
        self.hyper = hyper;
        self
    }

    pub fn set_step_size(&mut self, step_size: f64) -> &mut Self {
        self.hyper.step_size = step_size;
        self
    }

    pub fn set_regularization(&mut self, regularization: f64) -> &mut Self {
        self.hyper.regularization = regularization;
        self
    }

    pub fn set_steps_per_tick(&mut self, steps_per_tick: usize) -> &mut Self {
        self.hyper.steps_per_tick = steps_per_tick;
        self
    }

    /// Stops [`train`](Self::train) once the predicate holds for the losses so far.
    pub fn until_some(
        &mut self,
        early_terminate: impl Fn(&Vec<f64>) -> bool + 'static,
    ) -> &mut Self {
        self.early_terminate = Box::new(early_terminate);
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Report of the most recent step, if any step ran.
    pub fn last(&self) -> Option<Report> {
        self.last
    }

    pub fn network(&self) -> &Network {
        &*self.network
    }

    /// One update over the whole dataset. Rejects invalid hyperparameters
    /// before touching the network.
    pub fn step(&mut self, dataset: &Dataset) -> Result<Report> {
        self.hyper.validate()?;

        let report = self.network.train_step(
            dataset.points(),
            dataset.labels(),
            self.hyper.step_size,
            self.hyper.regularization,
        )?;

        self.iterations += 1;
        self.losses.push(report.loss);
        self.last = Some(report);

        let every = self.hyper.log_every;
        if self.iterations == 10 || (every > 0 && self.iterations % every == 0) {
            info!(
                iteration = self.iterations,
                loss = report.loss,
                accuracy = report.accuracy;
                "iterations: {}, loss: {:.5}, accuracy: {:.2}%",
                self.iterations,
                report.loss,
                100. * report.accuracy
            );
        }

        Ok(report)
    }

    /// `steps_per_tick` consecutive steps. Returns the report of the last one.
    pub fn tick(&mut self, dataset: &Dataset) -> Result<Report> {
        self.hyper.validate()?;

        let mut report = self.step(dataset)?;
        for _ in 1..self.hyper.steps_per_tick {
            report = self.step(dataset)?;
        }

        debug!("tick done at iteration {}", self.iterations);
        Ok(report)
    }

    /// Up to `ticks` ticks, checking the early termination predicate after each.
    pub fn train(&mut self, dataset: &Dataset, ticks: usize) -> Result<&mut Self> {
        self.hyper.validate()?;

        for _ in 0..ticks {
            self.tick(dataset)?;

            if (self.early_terminate)(&self.losses) {
                info!("early termination condition met at iteration {}", self.iterations);
                break;
            }
        }

        Ok(self)
    }
}
