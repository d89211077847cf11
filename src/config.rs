//! Configuration for drift scoring.
//!
//! All fields have defaults, so an empty YAML document is a valid config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DriftError, Result};

/// Conventional distinct-value count below which a numeric feature is
/// scored as categorical when the low-cardinality rule is enabled.
pub const DEFAULT_CATEGORICAL_THRESHOLD: usize = 20;

/// Floor substituted for zero proportions before taking logarithms.
pub const DEFAULT_ZERO_FLOOR: f64 = 1e-10;

/// Seed shared by the supervised splitter and the clusterer.
pub const DEFAULT_SEED: u64 = 42;

/// K-means parameters for the `kmeans` strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    /// Number of restarts; the lowest-inertia run wins
    pub n_init: usize,
    /// Lloyd iterations per restart
    pub max_iter: usize,
    /// Convergence tolerance relative to the data variance
    pub tol: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self { n_init: 10, max_iter: 300, tol: 1e-4 }
    }
}

/// Configuration for binning and scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Seed for the adaptive and kmeans strategies
    pub seed: u64,
    /// Score numeric features with fewer distinct values than this as
    /// categorical (`None` disables the rule)
    pub categorical_threshold: Option<usize>,
    /// Replacement for zero proportions
    pub zero_floor: f64,
    /// K-means parameters
    pub kmeans: KMeansConfig,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            categorical_threshold: None,
            zero_floor: DEFAULT_ZERO_FLOOR,
            kmeans: KMeansConfig::default(),
        }
    }
}

impl DriftConfig {
    /// Enable the low-cardinality categorical rule
    pub fn with_categorical_threshold(mut self, threshold: usize) -> Self {
        self.categorical_threshold = Some(threshold);
        self
    }

    /// Parse and validate a YAML config.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| DriftError::ConfigParsing { message: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| DriftError::io_at("reading config", path, e))?;
        Self::from_yaml_str(&content)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.zero_floor.is_finite() && self.zero_floor > 0.0) {
            return Err(DriftError::Config {
                field: "zero_floor".into(),
                message: format!("must be a positive finite number, got {}", self.zero_floor),
            });
        }
        if self.categorical_threshold == Some(0) {
            return Err(DriftError::Config {
                field: "categorical_threshold".into(),
                message: "must be at least 1 when set".into(),
            });
        }
        if self.kmeans.n_init == 0 {
            return Err(DriftError::Config {
                field: "kmeans.n_init".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.kmeans.max_iter == 0 {
            return Err(DriftError::Config {
                field: "kmeans.max_iter".into(),
                message: "must be at least 1".into(),
            });
        }
        if !(self.kmeans.tol.is_finite() && self.kmeans.tol >= 0.0) {
            return Err(DriftError::Config {
                field: "kmeans.tol".into(),
                message: format!("must be a non-negative finite number, got {}", self.kmeans.tol),
            });
        }
        Ok(())
    }
}
