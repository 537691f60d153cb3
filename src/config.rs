use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::DatasetConfig;
use crate::error::{NetworkError, Result};
use crate::optimizers::Hyper;

/// Shape and initialization of a [`Network`](crate::nn::Network). Changing
/// any dimension means building a new network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub input_dim: usize,
    pub hidden_size: usize,
    pub num_classes: usize,
    /// Half-width of the uniform weight initializer.
    pub init_scale: f64,
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            input_dim: 2,
            hidden_size: 100,
            num_classes: 3,
            init_scale: 0.01,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn new(input_dim: usize, hidden_size: usize, num_classes: usize) -> NetworkConfig {
        NetworkConfig {
            input_dim,
            hidden_size,
            num_classes,
            ..NetworkConfig::default()
        }
    }

    pub fn set_hidden_size(&mut self, hidden_size: usize) -> &mut Self {
        self.hidden_size = hidden_size;
        self
    }

    pub fn set_num_classes(&mut self, num_classes: usize) -> &mut Self {
        self.num_classes = num_classes;
        self
    }

    pub fn set_init_scale(&mut self, init_scale: f64) -> &mut Self {
        self.init_scale = init_scale;
        self
    }

    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("input_dim", self.input_dim),
            ("hidden_size", self.hidden_size),
            ("num_classes", self.num_classes),
        ] {
            if value == 0 {
                return Err(NetworkError::config(format!("{name} must be positive")));
            }
        }

        if !(self.init_scale.is_finite() && self.init_scale > 0.) {
            return Err(NetworkError::config(format!(
                "init_scale must be positive and finite, got {}",
                self.init_scale
            )));
        }

        Ok(())
    }
}

/// Everything one training run needs: the dataset to generate, the network to
/// fit to it and the optimizer settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub dataset: DatasetConfig,
    pub hyper: Hyper,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| NetworkError::config(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| NetworkError::config(format!("reading {}: {e}", path.display())))?;
        Config::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        self.dataset.validate()?;
        self.hyper.validate()?;

        if self.network.input_dim != 2 {
            return Err(NetworkError::config(format!(
                "generated points are 2-D but the network expects {}",
                self.network.input_dim
            )));
        }
        if self.network.num_classes != self.dataset.num_classes {
            return Err(NetworkError::config(format!(
                "the dataset has {} classes but the network predicts {}",
                self.dataset.num_classes, self.network.num_classes
            )));
        }

        Ok(())
    }
}
