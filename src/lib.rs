//! Feature drift scoring with the Characteristic/Population Stability Index.
//!
//! This crate compares a reference dataset against a new one, feature by
//! feature:
//! - Bin-edge derivation (equal width, equal frequency, supervised tree
//!   splits, k-means centers, or caller-supplied domain bins)
//! - Per-feature scoring over numeric intervals or exact-match categories
//! - Dataset aggregation into a ranked summary plus per-feature bin tables
//! - HTML/JSON reports with a pass/fail threshold
//!
//! # Example
//!
//! ```no_run
//! use driftscore::{score_dataset, BinningStrategy, Dataset, DatasetBinSpec, DriftReport};
//!
//! # fn main() -> driftscore::Result<()> {
//! let reference = Dataset::new().with_column("age", vec![21.0, 34.0, 45.0, 52.0])?;
//! let new = Dataset::new().with_column("age", vec![23.0, 61.0, 64.0, 70.0])?;
//!
//! let (summary, details) =
//!     score_dataset(&reference, &new, &DatasetBinSpec::Count(2), BinningStrategy::EqualFreq)?;
//! DriftReport::with_default_threshold(summary, details).write_html("Drift_Report.html")?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod binning;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod scoring;

pub use aggregate::{score_dataset, DatasetBinSpec, DetailTables, DriftSummary, SummaryRow};
pub use binning::{derive_edges, BinEdges, BinSpec, BinningStrategy, EdgeDeriver};
pub use config::DriftConfig;
pub use data::{Category, Dataset, Sample, Value};
pub use error::{DriftError, ErrorKind, Result, SampleRole};
pub use report::{DriftReport, TestResult, DEFAULT_DRIFT_THRESHOLD, DEFAULT_REPORT_PATH};
pub use scoring::{score_feature, Bin, BinRow, BinTable, DriftScorer, FeatureDriftResult};
