//! Bin-edge derivation.
//!
//! Strategies for turning a reference sample into bin boundaries:
//! - `equal_width`: evenly spaced edges over the reference range
//! - `equal_freq`: edges at evenly spaced reference percentiles
//! - `adaptive`: split thresholds of a classification tree fit to a target
//! - `kmeans`: sorted 1-D cluster centers
//! - `domain`: caller-supplied edges or category labels, returned verbatim
//!
//! The supervised and clustering strategies run behind the [`SplitLearner`]
//! and [`Clusterer`] traits so other backends can be plugged in.

mod edges;
mod histogram;
mod kmeans;
mod quantile;
mod spec;
mod strategy;
mod tree;

#[cfg(test)]
mod tests;

pub use edges::{
    dedup_edges, derive_edges, sanitize_thresholds, widen_tails, BinEdges, EdgeDeriver,
};
pub use histogram::{bin_counts, bucket_index};
pub use kmeans::{Clusterer, KMeans1d};
pub use quantile::{linspace, percentile};
pub use spec::BinSpec;
pub use strategy::BinningStrategy;
pub use tree::{DecisionTreeSplitter, SplitLearner, LEAF_THRESHOLD};
