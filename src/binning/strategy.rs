//! Binning strategy names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DriftError;

/// How bin edges are derived for a feature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinningStrategy {
    /// Evenly spaced edges from the reference minimum to maximum
    #[serde(rename = "equal_width")]
    EqualWidth,
    /// Edges at evenly spaced reference percentiles
    #[default]
    #[serde(rename = "equal_freq")]
    EqualFreq,
    /// Split thresholds of a classification tree fit against a target
    #[serde(rename = "adaptive")]
    Adaptive,
    /// Sorted 1-D k-means centers
    #[serde(rename = "kmeans")]
    KMeans,
    /// Caller-supplied edges or category labels, used verbatim
    #[serde(rename = "domain")]
    Domain,
}

impl BinningStrategy {
    /// All strategies, in documentation order
    pub const ALL: [BinningStrategy; 5] = [
        BinningStrategy::EqualWidth,
        BinningStrategy::EqualFreq,
        BinningStrategy::Adaptive,
        BinningStrategy::KMeans,
        BinningStrategy::Domain,
    ];

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            BinningStrategy::EqualWidth => "equal_width",
            BinningStrategy::EqualFreq => "equal_freq",
            BinningStrategy::Adaptive => "adaptive",
            BinningStrategy::KMeans => "kmeans",
            BinningStrategy::Domain => "domain",
        }
    }

    /// Supported names formatted for error messages
    pub fn supported_names() -> String {
        let quoted: Vec<String> = Self::ALL.iter().map(|s| format!("'{}'", s.name())).collect();
        quoted.join(", ")
    }

    /// Whether edges come from the caller rather than the data
    pub fn is_domain(&self) -> bool {
        matches!(self, BinningStrategy::Domain)
    }
}

impl fmt::Display for BinningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BinningStrategy {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| DriftError::UnknownStrategy { name: s.to_string() })
    }
}
