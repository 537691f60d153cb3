use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyper {
    pub step_size: f64,
    pub regularization: f64,
    /// Updates per tick. A driver classifies its grid once per tick.
    pub steps_per_tick: usize,
    /// Progress is logged at iteration 10 and every `log_every` iterations.
    pub log_every: usize,
}

impl Default for Hyper {
    fn default() -> Self {
        Hyper {
            step_size: 1.,
            regularization: 0.001,
            steps_per_tick: 10,
            log_every: 50,
        }
    }
}

impl Hyper {
    pub fn new() -> Hyper {
        Hyper::default()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.step_size.is_finite() {
            return Err(NetworkError::config(format!(
                "step_size must be finite, got {}",
                self.step_size
            )));
        }
        if !(self.regularization.is_finite() && self.regularization >= 0.) {
            return Err(NetworkError::config(format!(
                "regularization must be finite and non-negative, got {}",
                self.regularization
            )));
        }
        if self.steps_per_tick == 0 {
            return Err(NetworkError::config("steps_per_tick must be positive"));
        }
        Ok(())
    }
}
