//! Bin-edge derivation.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::kmeans::{Clusterer, KMeans1d};
use super::quantile::{equal_freq_edges, equal_width_edges};
use super::spec::BinSpec;
use super::strategy::BinningStrategy;
use super::tree::{DecisionTreeSplitter, SplitLearner};
use crate::config::DriftConfig;
use crate::data::{Category, Sample, Value};
use crate::error::{DriftError, Result, SampleRole};

/// Derived bin boundaries, or domain labels returned verbatim.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BinEdges {
    /// Numeric boundaries (sorted; may repeat before deduplication)
    Numeric(Vec<f64>),
    /// Caller-supplied edges or categories in caller order
    Labels(Vec<Value>),
}

impl BinEdges {
    /// Number of entries
    pub fn len(&self) -> usize {
        match self {
            BinEdges::Numeric(e) => e.len(),
            BinEdges::Labels(l) => l.len(),
        }
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric boundaries, if derived
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            BinEdges::Numeric(e) => Some(e),
            BinEdges::Labels(_) => None,
        }
    }

    /// Domain labels, if supplied
    pub fn as_labels(&self) -> Option<&[Value]> {
        match self {
            BinEdges::Labels(l) => Some(l),
            BinEdges::Numeric(_) => None,
        }
    }
}

/// Sort and drop repeated edges.
pub fn dedup_edges(edges: &[f64]) -> Vec<f64> {
    let mut out = edges.to_vec();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

/// Deduplicate, then replace the outermost edges with infinities so every
/// value falls in some bin. Fewer than two distinct edges collapse to the
/// single bin `(-inf, +inf)`.
pub fn widen_tails(edges: &[f64]) -> Vec<f64> {
    let mut out = dedup_edges(edges);
    if out.len() < 2 {
        return vec![f64::NEG_INFINITY, f64::INFINITY];
    }
    let last = out.len() - 1;
    out[0] = f64::NEG_INFINITY;
    out[last] = f64::INFINITY;
    out
}

/// Keep learner thresholds that are strictly positive, sorted, at most
/// `max_splits` of them.
///
/// Non-positive thresholds are treated as the leaf sentinel, so a genuine
/// split at exactly 0.0 (or below) is discarded as well.
pub fn sanitize_thresholds(raw: &[f64], max_splits: usize) -> Vec<f64> {
    let mut kept: Vec<f64> = raw.iter().copied().filter(|&t| t > 0.0).collect();
    kept.sort_by(f64::total_cmp);
    kept.truncate(max_splits);
    kept
}

/// Derives bin edges, delegating the adaptive and kmeans strategies to
/// pluggable backends.
pub struct EdgeDeriver {
    learner: Box<dyn SplitLearner>,
    clusterer: Box<dyn Clusterer>,
}

impl Default for EdgeDeriver {
    fn default() -> Self {
        Self::with_default_backends(&DriftConfig::default())
    }
}

impl EdgeDeriver {
    /// Default backends seeded from the config.
    ///
    /// Fails if the config does not pass [`DriftConfig::validate`].
    pub fn new(config: &DriftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_default_backends(config))
    }

    fn with_default_backends(config: &DriftConfig) -> Self {
        Self {
            learner: Box::new(DecisionTreeSplitter::new(config.seed)),
            clusterer: Box::new(KMeans1d::from_config(config)),
        }
    }

    /// Replace the supervised split learner
    pub fn with_learner(mut self, learner: impl SplitLearner + 'static) -> Self {
        self.learner = Box::new(learner);
        self
    }

    /// Replace the clusterer
    pub fn with_clusterer(mut self, clusterer: impl Clusterer + 'static) -> Self {
        self.clusterer = Box::new(clusterer);
        self
    }

    /// Derive bin edges for `reference`.
    ///
    /// Domain mode returns the supplied labels unchanged. Every other
    /// strategy drops missing values and requires numeric data.
    pub fn derive(
        &self,
        reference: &Sample,
        spec: &BinSpec,
        strategy: BinningStrategy,
    ) -> Result<BinEdges> {
        let edges = match strategy {
            BinningStrategy::Domain => return Self::domain(spec),
            BinningStrategy::EqualWidth => {
                let values = Self::clean(reference)?;
                equal_width_edges(&values, Self::checked_count(spec, strategy, 1)?)
            }
            BinningStrategy::EqualFreq => {
                let values = Self::clean(reference)?;
                equal_freq_edges(&values, Self::checked_count(spec, strategy, 1)?)
            }
            BinningStrategy::KMeans => {
                let values = Self::clean(reference)?;
                let k = Self::checked_count(spec, strategy, 1)?;
                self.clusterer.cluster_1d(&values, k)?
            }
            BinningStrategy::Adaptive => self.adaptive(reference, spec)?,
        };

        debug!(strategy = %strategy, ?edges, "derived bin edges");
        Ok(BinEdges::Numeric(edges))
    }

    fn domain(spec: &BinSpec) -> Result<BinEdges> {
        match spec {
            BinSpec::Domain(labels) if labels.len() < 2 => {
                Err(DriftError::DomainTooShort { len: labels.len() })
            }
            BinSpec::Domain(labels) => Ok(BinEdges::Labels(labels.clone())),
            BinSpec::Count(count) | BinSpec::Supervised { max_bins: count, .. } => {
                Err(DriftError::DomainBinsNotList { count: *count })
            }
        }
    }

    fn checked_count(spec: &BinSpec, strategy: BinningStrategy, min: usize) -> Result<usize> {
        let bins = spec.bin_count(strategy)?;
        if bins < min {
            return Err(DriftError::InvalidBinCount { strategy, bins, min });
        }
        Ok(bins)
    }

    fn check_reference(reference: &Sample) -> Result<()> {
        if reference.is_empty() {
            return Err(DriftError::EmptySample { sample: SampleRole::Reference });
        }
        if !reference.is_numeric() {
            return Err(DriftError::NonNumeric { sample: SampleRole::Reference });
        }
        Ok(())
    }

    fn clean(reference: &Sample) -> Result<Vec<f64>> {
        Self::check_reference(reference)?;
        let values = reference.numeric_values(SampleRole::Reference)?;
        if values.is_empty() {
            return Err(DriftError::AllMissing { sample: SampleRole::Reference });
        }
        Ok(values)
    }

    fn adaptive(&self, reference: &Sample, spec: &BinSpec) -> Result<Vec<f64>> {
        Self::check_reference(reference)?;
        let strategy = BinningStrategy::Adaptive;
        let (max_bins, target) = match spec {
            BinSpec::Supervised { max_bins, target } => (*max_bins, target),
            BinSpec::Count(_) => return Err(DriftError::TargetRequired),
            BinSpec::Domain(_) => return Err(DriftError::BinCountRequired { strategy }),
        };
        if reference.len() != target.len() {
            return Err(DriftError::TargetLengthMismatch {
                reference: reference.len(),
                target: target.len(),
            });
        }
        if target.iter().any(Value::is_missing) {
            return Err(DriftError::TargetHasMissing);
        }
        if max_bins < 2 {
            return Err(DriftError::InvalidBinCount { strategy, bins: max_bins, min: 2 });
        }

        let classes: BTreeMap<Category, usize> = target
            .categories()
            .into_iter()
            .enumerate()
            .map(|(i, c)| (c, i))
            .collect();

        let mut values = Vec::with_capacity(reference.len());
        let mut labels = Vec::with_capacity(reference.len());
        for (value, label) in reference.iter().zip(target.iter()) {
            let Some(x) = value.as_f64() else { continue };
            let Some(&class) = label.to_category().as_ref().and_then(|c| classes.get(c)) else {
                continue;
            };
            values.push(x);
            labels.push(class);
        }
        if values.is_empty() {
            return Err(DriftError::AllMissing { sample: SampleRole::Reference });
        }

        let raw = self.learner.fit_binary_splits(&values, &labels, max_bins)?;
        let thresholds = sanitize_thresholds(&raw, max_bins - 1);
        debug!(?raw, ?thresholds, "adaptive split thresholds");
        Ok(thresholds)
    }
}

/// Derive edges with the default backends.
pub fn derive_edges(
    reference: &Sample,
    spec: &BinSpec,
    strategy: BinningStrategy,
    config: &DriftConfig,
) -> Result<BinEdges> {
    EdgeDeriver::new(config)?.derive(reference, spec, strategy)
}
