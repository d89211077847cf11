//! Scoring every shared column of two datasets.

use tracing::{debug, info};

use super::types::{DatasetBinSpec, DetailTables, DriftSummary, SummaryRow};
use crate::binning::{BinSpec, BinningStrategy};
use crate::data::{Dataset, Sample};
use crate::error::{DriftError, Result};
use crate::scoring::DriftScorer;

impl DriftScorer {
    /// Score every column of `reference` against the same column of `new`.
    ///
    /// A column is skipped when `new` lacks it or when either side has no
    /// non-missing values. Any other failure aborts the whole run.
    pub fn score_dataset(
        &self,
        reference: &Dataset,
        new: &Dataset,
        spec: &DatasetBinSpec,
        strategy: BinningStrategy,
    ) -> Result<(DriftSummary, DetailTables)> {
        let target = match spec.target_column() {
            Some(column) => Some(reference.column(column).ok_or_else(|| {
                DriftError::TargetColumnNotFound { column: column.to_string() }
            })?),
            None => None,
        };

        let mut rows = Vec::new();
        let mut details = DetailTables::new();
        let mut skipped = 0usize;

        for (feature, reference_col) in reference.iter() {
            if spec.target_column() == Some(feature) {
                continue;
            }
            let Some(new_col) = new.column(feature) else {
                debug!(feature, "skipping column absent from new dataset");
                skipped += 1;
                continue;
            };
            if reference_col.non_missing_len() == 0 || new_col.non_missing_len() == 0 {
                debug!(feature, "skipping column with no non-missing values");
                skipped += 1;
                continue;
            }

            let bin_spec = feature_spec(feature, spec, strategy, target)?;
            let result = self.score_feature(reference_col, new_col, &bin_spec, strategy)?;
            debug!(feature, strategy = %result.strategy, drift = result.score, "scored column");

            rows.push(SummaryRow {
                feature: feature.to_string(),
                strategy: result.strategy,
                drift: result.score,
            });
            details.insert(feature.to_string(), result.table);
        }

        info!(scored = rows.len(), skipped, strategy = %strategy, "dataset drift computed");
        Ok((DriftSummary::from_rows(rows), details))
    }
}

/// Resolve the dataset spec to one feature's bin spec.
fn feature_spec(
    feature: &str,
    spec: &DatasetBinSpec,
    strategy: BinningStrategy,
    target: Option<&Sample>,
) -> Result<BinSpec> {
    if strategy.is_domain() {
        let DatasetBinSpec::Domain(map) = spec else {
            return Err(DriftError::DomainSpecRequired { feature: feature.to_string() });
        };
        return map
            .get(feature)
            .map(|labels| BinSpec::Domain(labels.clone()))
            .ok_or_else(|| DriftError::MissingDomainBins { feature: feature.to_string() });
    }

    match (spec, target) {
        (DatasetBinSpec::Count(bins), _) => Ok(BinSpec::Count(*bins)),
        (DatasetBinSpec::Supervised { max_bins, .. }, Some(target)) => {
            Ok(BinSpec::Supervised { max_bins: *max_bins, target: target.clone() })
        }
        (DatasetBinSpec::Supervised { .. }, None) => Err(DriftError::TargetRequired),
        (DatasetBinSpec::Domain(_), _) => Err(DriftError::BinCountRequired { strategy }),
    }
}

/// Score two datasets with a default-configured scorer.
pub fn score_dataset(
    reference: &Dataset,
    new: &Dataset,
    spec: &DatasetBinSpec,
    strategy: BinningStrategy,
) -> Result<(DriftSummary, DetailTables)> {
    DriftScorer::default().score_dataset(reference, new, spec, strategy)
}
