//! Per-feature drift scoring.

use tracing::debug;

use super::stability::build_table;
use super::types::{Bin, FeatureDriftResult, ResolvedBinning};
use crate::binning::{bin_counts, widen_tails, BinEdges, BinSpec, BinningStrategy, EdgeDeriver};
use crate::config::DriftConfig;
use crate::data::{Category, Sample, Value};
use crate::error::{DriftError, Result, SampleRole};

/// Bins and per-bin counts for both samples
struct BinnedCounts {
    resolved: ResolvedBinning,
    bins: Vec<Bin>,
    reference: Vec<usize>,
    new: Vec<usize>,
}

/// Scores the distribution shift of a feature between two samples.
pub struct DriftScorer {
    config: DriftConfig,
    deriver: EdgeDeriver,
}

impl Default for DriftScorer {
    fn default() -> Self {
        Self { config: DriftConfig::default(), deriver: EdgeDeriver::default() }
    }
}

impl DriftScorer {
    /// Create a scorer with the default learners seeded from `config`.
    ///
    /// The config is validated first, so a non-positive `zero_floor` can
    /// never reach the logarithm.
    pub fn new(config: DriftConfig) -> Result<Self> {
        let deriver = EdgeDeriver::new(&config)?;
        Ok(Self { config, deriver })
    }

    /// Replace the edge deriver (e.g. to plug in other learners)
    pub fn with_deriver(mut self, deriver: EdgeDeriver) -> Self {
        self.deriver = deriver;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Whether `reference` is scored by exact category match.
    ///
    /// Text data always is. Numeric data is when the low-cardinality rule is
    /// enabled and the strategy is not `domain`.
    pub fn is_categorical(&self, reference: &Sample, strategy: BinningStrategy) -> bool {
        if !reference.is_numeric() {
            return true;
        }
        match self.config.categorical_threshold {
            Some(threshold) if !strategy.is_domain() => reference.distinct_count() < threshold,
            _ => false,
        }
    }

    /// Score one feature.
    ///
    /// Missing values are dropped from both samples before counting.
    pub fn score_feature(
        &self,
        reference: &Sample,
        new: &Sample,
        spec: &BinSpec,
        strategy: BinningStrategy,
    ) -> Result<FeatureDriftResult> {
        if reference.is_empty() {
            return Err(DriftError::EmptySample { sample: SampleRole::Reference });
        }
        if new.is_empty() {
            return Err(DriftError::EmptySample { sample: SampleRole::New });
        }

        let counts = if self.is_categorical(reference, strategy) {
            self.categorical_counts(reference, new, spec, strategy)?
        } else {
            self.numeric_counts(reference, new, spec, strategy)?
        };

        let table =
            build_table(counts.bins, &counts.reference, &counts.new, self.config.zero_floor)?;
        let score = table.total_drift();
        debug!(strategy = %counts.resolved, bins = table.len(), score, "scored feature");
        Ok(FeatureDriftResult { strategy: counts.resolved, table, score })
    }

    fn categorical_counts(
        &self,
        reference: &Sample,
        new: &Sample,
        spec: &BinSpec,
        strategy: BinningStrategy,
    ) -> Result<BinnedCounts> {
        let (resolved, categories) = if strategy.is_domain() {
            let labels = match self.deriver.derive(reference, spec, strategy)? {
                BinEdges::Labels(labels) => labels,
                BinEdges::Numeric(edges) => edges.into_iter().map(Value::Number).collect(),
            };
            (ResolvedBinning::Strategy(strategy), domain_categories(&labels))
        } else {
            let mut universe = reference.categories();
            universe.extend(new.categories());
            (ResolvedBinning::Categorical, universe.into_iter().collect())
        };

        let count = |sample: &Sample, category: &Category| {
            sample.iter().filter(|v| category.matches(v)).count()
        };
        Ok(BinnedCounts {
            resolved,
            reference: categories.iter().map(|c| count(reference, c)).collect(),
            new: categories.iter().map(|c| count(new, c)).collect(),
            bins: categories.into_iter().map(Bin::Category).collect(),
        })
    }

    fn numeric_counts(
        &self,
        reference: &Sample,
        new: &Sample,
        spec: &BinSpec,
        strategy: BinningStrategy,
    ) -> Result<BinnedCounts> {
        let edges = match self.deriver.derive(reference, spec, strategy)? {
            BinEdges::Numeric(edges) => widen_tails(&edges),
            BinEdges::Labels(labels) => numeric_domain_edges(&labels)?,
        };
        debug!(strategy = %strategy, ?edges, "resolved bin edges");

        let reference_values = reference.numeric_values(SampleRole::Reference)?;
        let new_values = new.numeric_values(SampleRole::New)?;
        Ok(BinnedCounts {
            resolved: ResolvedBinning::Strategy(strategy),
            bins: edges.windows(2).map(|w| Bin::Interval { lower: w[0], upper: w[1] }).collect(),
            reference: bin_counts(&reference_values, &edges),
            new: bin_counts(&new_values, &edges),
        })
    }
}

/// Domain labels as categories, caller order, first occurrence wins.
fn domain_categories(labels: &[Value]) -> Vec<Category> {
    let mut out: Vec<Category> = Vec::with_capacity(labels.len());
    for category in labels.iter().filter_map(Value::to_category) {
        if !out.contains(&category) {
            out.push(category);
        }
    }
    out
}

/// Domain labels as sorted, distinct numeric edges. Not widened.
fn numeric_domain_edges(labels: &[Value]) -> Result<Vec<f64>> {
    let mut edges = Vec::with_capacity(labels.len());
    for label in labels {
        let Some(x) = label.as_f64() else {
            return Err(DriftError::NonNumericEdge { label: label.to_string() });
        };
        edges.push(x);
    }
    edges.sort_by(f64::total_cmp);
    edges.dedup();
    if edges.len() < 2 {
        return Err(DriftError::DomainTooShort { len: edges.len() });
    }
    Ok(edges)
}

/// Score one feature with a default-configured scorer.
pub fn score_feature(
    reference: &Sample,
    new: &Sample,
    spec: &BinSpec,
    strategy: BinningStrategy,
) -> Result<FeatureDriftResult> {
    DriftScorer::default().score_feature(reference, new, spec, strategy)
}
