//! Per-feature bin specification.

use crate::data::{Sample, Value};
use crate::error::{DriftError, Result};

use super::strategy::BinningStrategy;

/// What the caller supplies alongside a strategy.
#[derive(Clone, Debug, PartialEq)]
pub enum BinSpec {
    /// Number of bins for a data-driven strategy
    Count(usize),
    /// Upper bound on leaves plus a target aligned 1:1 with the reference sample
    Supervised { max_bins: usize, target: Sample },
    /// Explicit edges or category labels, in caller order
    Domain(Vec<Value>),
}

impl BinSpec {
    /// Domain spec from anything convertible to values
    pub fn domain<V: Into<Value>>(labels: impl IntoIterator<Item = V>) -> Self {
        BinSpec::Domain(labels.into_iter().map(Into::into).collect())
    }

    /// Supervised spec
    pub fn supervised(max_bins: usize, target: impl Into<Sample>) -> Self {
        BinSpec::Supervised { max_bins, target: target.into() }
    }

    /// Bin count for a counted strategy.
    pub(crate) fn bin_count(&self, strategy: BinningStrategy) -> Result<usize> {
        match self {
            BinSpec::Count(bins) | BinSpec::Supervised { max_bins: bins, .. } => Ok(*bins),
            BinSpec::Domain(_) => Err(DriftError::BinCountRequired { strategy }),
        }
    }
}

impl From<usize> for BinSpec {
    fn from(bins: usize) -> Self {
        BinSpec::Count(bins)
    }
}
