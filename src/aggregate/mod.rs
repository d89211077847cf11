//! Feature-set aggregation.
//!
//! Scores every column shared by a reference and a new dataset and ranks
//! the features by drift.

mod aggregator;
mod types;


pub use aggregator::score_dataset;
pub use types::{DatasetBinSpec, DetailTables, DriftSummary, SummaryRow};
