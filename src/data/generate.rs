use std::f64::consts::PI;

use log::debug;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::Dataset;
use crate::error::{NetworkError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// One noisy spiral arm per class, wound around the origin.
    Spiral,
    /// One blob per class, spread evenly around a circle.
    Clusters,
}

const CLUSTER_RADIUS: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub pattern: Pattern,
    pub num_points: usize,
    pub num_classes: usize,
    /// Spiral: amplitude of the random angle offset. Clusters: per-axis jitter.
    pub noise: f64,
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            pattern: Pattern::Spiral,
            num_points: 200,
            num_classes: 3,
            noise: 0.25,
            seed: None,
        }
    }
}

impl DatasetConfig {
    pub fn new(pattern: Pattern, num_points: usize, num_classes: usize) -> DatasetConfig {
        DatasetConfig {
            pattern,
            num_points,
            num_classes,
            ..DatasetConfig::default()
        }
    }

    pub fn set_num_points(&mut self, num_points: usize) -> &mut Self {
        self.num_points = num_points;
        self
    }

    pub fn set_num_classes(&mut self, num_classes: usize) -> &mut Self {
        self.num_classes = num_classes;
        self
    }

    pub fn set_noise(&mut self, noise: f64) -> &mut Self {
        self.noise = noise;
        self
    }

    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_points == 0 {
            return Err(NetworkError::config("num_points must be positive"));
        }
        if self.num_classes == 0 {
            return Err(NetworkError::config("num_classes must be positive"));
        }
        if !(self.noise.is_finite() && self.noise >= 0.) {
            return Err(NetworkError::config(format!(
                "noise must be finite and non-negative, got {}",
                self.noise
            )));
        }
        Ok(())
    }
}

/// Labeled 2-D points for the configured pattern. With a seed the result is a
/// pure function of the config.
pub fn generate(config: &DatasetConfig) -> Result<Dataset> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (points, labels) = match config.pattern {
        Pattern::Spiral => spiral(config, &mut rng),
        Pattern::Clusters => clusters(config, &mut rng),
    };

    debug!(
        "generated {:?} dataset: {} points, {} classes",
        config.pattern, config.num_points, config.num_classes
    );

    Dataset::new(points, labels, config.num_classes)
}

fn spiral<R: Rng>(config: &DatasetConfig, rng: &mut R) -> (Array2<f64>, Vec<usize>) {
    let classes = config.num_classes as f64;
    let per_class = config.num_points as f64 / classes;

    let mut points = Array2::zeros((config.num_points, 2));
    let mut labels = Vec::with_capacity(config.num_points);

    for (i, mut point) in points.rows_mut().into_iter().enumerate() {
        let i = i as f64;
        let class = ((i / per_class).floor() as usize).min(config.num_classes - 1);

        let radius = (i % per_class) / per_class;
        let angle = class as f64 * 2. * PI / classes + radius * 4. + config.noise * rng.gen::<f64>();

        point[0] = radius * angle.cos();
        point[1] = radius * angle.sin();
        labels.push(class);
    }

    (points, labels)
}

fn clusters<R: Rng>(config: &DatasetConfig, rng: &mut R) -> (Array2<f64>, Vec<usize>) {
    let classes = config.num_classes as f64;

    let mut points = Array2::zeros((config.num_points, 2));
    let mut labels = Vec::with_capacity(config.num_points);

    for (i, mut point) in points.rows_mut().into_iter().enumerate() {
        let class = i % config.num_classes;
        let angle = class as f64 * 2. * PI / classes;

        point[0] = CLUSTER_RADIUS * angle.cos() + config.noise * rng.gen_range(-1.0f64..1.0);
        point[1] = CLUSTER_RADIUS * angle.sin() + config.noise * rng.gen_range(-1.0f64..1.0);
        labels.push(class);
    }

    (points, labels)
}
