//! Dataset-level specification and summary types.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::data::Value;
use crate::scoring::{BinTable, ResolvedBinning};

/// Per-feature bin tables keyed by feature name.
pub type DetailTables = BTreeMap<String, BinTable>;

/// Bin specification shared by every feature of a dataset.
#[derive(Clone, Debug, PartialEq)]
pub enum DatasetBinSpec {
    /// Same bin count for every feature
    Count(usize),
    /// Supervised binning against a column of the reference dataset
    Supervised { max_bins: usize, target_column: String },
    /// Explicit edges or categories per feature
    Domain(HashMap<String, Vec<Value>>),
}

impl DatasetBinSpec {
    /// Domain map from `(feature, labels)` pairs
    pub fn domain<N, V, L>(entries: impl IntoIterator<Item = (N, L)>) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
        L: IntoIterator<Item = V>,
    {
        DatasetBinSpec::Domain(
            entries
                .into_iter()
                .map(|(name, labels)| (name.into(), labels.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// Target column, if supervised
    pub fn target_column(&self) -> Option<&str> {
        match self {
            DatasetBinSpec::Supervised { target_column, .. } => Some(target_column),
            _ => None,
        }
    }
}

impl From<usize> for DatasetBinSpec {
    fn from(bins: usize) -> Self {
        DatasetBinSpec::Count(bins)
    }
}

/// One feature's line in the summary
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryRow {
    pub feature: String,
    pub strategy: ResolvedBinning,
    pub drift: f64,
}

/// Drift per feature, highest first
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DriftSummary {
    rows: Vec<SummaryRow>,
}

impl DriftSummary {
    /// Build from unordered rows; ties keep their input order.
    pub fn from_rows(mut rows: Vec<SummaryRow>) -> Self {
        rows.sort_by(|a, b| b.drift.total_cmp(&a.drift));
        Self { rows }
    }

    /// Rows, descending by drift
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Number of scored features
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no feature was scored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a feature
    pub fn get(&self, feature: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.feature == feature)
    }

    /// Largest drift score, if any feature was scored
    pub fn max_drift(&self) -> Option<f64> {
        self.rows.first().map(|r| r.drift)
    }

    /// Rows whose drift exceeds `threshold`
    pub fn failing(&self, threshold: f64) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter().filter(move |r| r.drift > threshold)
    }
}

impl<'a> IntoIterator for &'a DriftSummary {
    type Item = &'a SummaryRow;
    type IntoIter = std::slice::Iter<'a, SummaryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
