//! Type definitions for per-feature drift results.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::binning::BinningStrategy;
use crate::data::Category;

/// One bin of a drift table
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bin {
    /// Numeric interval `[lower, upper)` (closed on the right for the last bin)
    Interval { lower: f64, upper: f64 },
    /// Exact-match category
    Category(Category),
}

impl Bin {
    /// Lower bound, or the category label
    pub fn min_label(&self) -> String {
        match self {
            Bin::Interval { lower, .. } => format_bound(*lower),
            Bin::Category(c) => c.to_string(),
        }
    }

    /// Upper bound, or the category label
    pub fn max_label(&self) -> String {
        match self {
            Bin::Interval { upper, .. } => format_bound(*upper),
            Bin::Category(c) => c.to_string(),
        }
    }
}

fn format_bound(x: f64) -> String {
    if x == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if x == f64::INFINITY {
        "inf".to_string()
    } else {
        format!("{x:.4}")
    }
}

/// Counts, proportions and divergence for one bin
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinRow {
    pub bin: Bin,
    pub reference_count: usize,
    pub new_count: usize,
    /// Reference proportion after the zero floor
    pub reference_pct: f64,
    /// New proportion after the zero floor
    pub new_pct: f64,
    /// `(new_pct - reference_pct) * ln(new_pct / reference_pct)`
    pub contribution: f64,
}

/// Per-bin breakdown for one feature
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BinTable {
    rows: Vec<BinRow>,
}

impl BinTable {
    pub(crate) fn new(rows: Vec<BinRow>) -> Self {
        Self { rows }
    }

    /// Rows in bin order
    pub fn rows(&self) -> &[BinRow] {
        &self.rows
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no bins
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of per-bin contributions
    pub fn total_drift(&self) -> f64 {
        self.rows.iter().map(|r| r.contribution).sum()
    }

    /// Total reference observations counted
    pub fn reference_total(&self) -> usize {
        self.rows.iter().map(|r| r.reference_count).sum()
    }

    /// Total new observations counted
    pub fn new_total(&self) -> usize {
        self.rows.iter().map(|r| r.new_count).sum()
    }
}

impl<'a> IntoIterator for &'a BinTable {
    type Item = &'a BinRow;
    type IntoIter = std::slice::Iter<'a, BinRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// How a feature was actually binned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedBinning {
    /// Requested strategy (including `domain` for categorical domain lists)
    Strategy(BinningStrategy),
    /// Exact-match category counts over the observed categories
    Categorical,
}

impl ResolvedBinning {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ResolvedBinning::Strategy(s) => s.name(),
            ResolvedBinning::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ResolvedBinning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ResolvedBinning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Drift result for a single feature
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureDriftResult {
    /// Strategy label as resolved by the scorer
    pub strategy: ResolvedBinning,
    /// Per-bin breakdown
    pub table: BinTable,
    /// Total drift score
    pub score: f64,
}
