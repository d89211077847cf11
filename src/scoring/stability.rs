//! Stability index arithmetic.
//!
//! Proportions are each sample's counts over its own total. Zero proportions
//! are replaced by a floor without renormalizing, so floored proportions may
//! sum to slightly more than one.

use super::types::{Bin, BinRow, BinTable};
use crate::error::{DriftError, Result, SampleRole};

/// Counts as proportions of their total.
pub fn proportions(counts: &[usize], sample: SampleRole) -> Result<Vec<f64>> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return Err(DriftError::ZeroTotal { sample });
    }
    let total = total as f64;
    Ok(counts.iter().map(|&c| c as f64 / total).collect())
}

/// Replace an exact zero with `floor`.
pub fn apply_floor(p: f64, floor: f64) -> f64 {
    if p == 0.0 {
        floor
    } else {
        p
    }
}

/// Divergence contribution of one bin.
pub fn contribution(reference_pct: f64, new_pct: f64) -> f64 {
    (new_pct - reference_pct) * (new_pct / reference_pct).ln()
}

/// Assemble a table from per-bin counts.
pub(crate) fn build_table(
    bins: Vec<Bin>,
    reference_counts: &[usize],
    new_counts: &[usize],
    floor: f64,
) -> Result<BinTable> {
    let reference_pct = proportions(reference_counts, SampleRole::Reference)?;
    let new_pct = proportions(new_counts, SampleRole::New)?;

    let rows = bins
        .into_iter()
        .enumerate()
        .map(|(i, bin)| {
            let r = apply_floor(reference_pct[i], floor);
            let n = apply_floor(new_pct[i], floor);
            BinRow {
                bin,
                reference_count: reference_counts[i],
                new_count: new_counts[i],
                reference_pct: r,
                new_pct: n,
                contribution: contribution(r, n),
            }
        })
        .collect();
    Ok(BinTable::new(rows))
}
