//! Bucketing values into edges.
//!
//! Bin `i` holds `[edges[i], edges[i + 1])`; the last bin is closed on both
//! ends. Values outside the edges are not counted.

/// Index of the bin holding `value`, if any.
pub fn bucket_index(edges: &[f64], value: f64) -> Option<usize> {
    let n_bins = edges.len().checked_sub(1)?;
    if n_bins == 0 || value.is_nan() {
        return None;
    }
    let last = edges[n_bins];
    if value < edges[0] || value > last {
        return None;
    }
    if value == last {
        return Some(n_bins - 1);
    }
    // first edge strictly greater than value
    let upper = edges.partition_point(|&e| e <= value);
    Some(upper - 1)
}

/// Count samples in bins defined by edges
pub fn bin_counts(data: &[f64], edges: &[f64]) -> Vec<usize> {
    let mut counts = vec![0; edges.len().saturating_sub(1)];
    for &val in data {
        if let Some(i) = bucket_index(edges, val) {
            counts[i] += 1;
        }
    }
    counts
}
