//! Drift scoring.
//!
//! Computes the characteristic/population stability index of a feature:
//! each sample is binned, counts become proportions, zero proportions are
//! floored, and every bin contributes
//! `(new% - reference%) * ln(new% / reference%)` to the score.

mod scorer;
mod stability;
mod types;


pub use scorer::{score_feature, DriftScorer};
pub use stability::{apply_floor, contribution, proportions};
pub use types::{Bin, BinRow, BinTable, FeatureDriftResult, ResolvedBinning};
