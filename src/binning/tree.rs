//! Supervised split finding for the `adaptive` strategy.
//!
//! The default learner grows a one-feature CART classification tree
//! best-first (largest impurity decrease first) until it reaches the leaf
//! budget or no node can be split. Because there is only one feature, every
//! node covers a contiguous run of the value-sorted sample, so candidate
//! splits are scanned in a single pass per node.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DriftError, Result};

/// Threshold reported for leaf nodes.
pub const LEAF_THRESHOLD: f64 = -2.0;

const TIE_EPSILON: f64 = 1e-12;

/// Learner that proposes split thresholds for a numeric feature against
/// class labels.
pub trait SplitLearner: Send + Sync {
    /// Fit and return one threshold per tree node, in node order, with
    /// [`LEAF_THRESHOLD`] for leaves.
    fn fit_binary_splits(&self, values: &[f64], labels: &[usize], max_leaves: usize)
        -> Result<Vec<f64>>;
}

/// Gini-impurity decision tree on a single feature.
#[derive(Clone, Debug)]
pub struct DecisionTreeSplitter {
    seed: u64,
}

impl DecisionTreeSplitter {
    /// Create a splitter; `seed` breaks ties between equally good thresholds
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

#[derive(Clone, Copy, Debug)]
struct SplitPoint {
    /// First index of the right child
    pos: usize,
    threshold: f64,
    improvement: f64,
}

#[derive(Debug)]
struct Frontier {
    node: usize,
    start: usize,
    end: usize,
    split: Option<SplitPoint>,
}

fn gini(counts: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts.iter().map(|&c| (c as f64 / n).powi(2)).sum::<f64>()
}

fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = lo + (hi - lo) / 2.0;
    if mid == hi || !mid.is_finite() {
        lo
    } else {
        mid
    }
}

fn best_split(
    xs: &[f64],
    ys: &[usize],
    start: usize,
    end: usize,
    n_classes: usize,
    rng: &mut StdRng,
) -> Option<SplitPoint> {
    let n = end - start;
    if n < 2 {
        return None;
    }

    let mut total = vec![0usize; n_classes];
    for &y in &ys[start..end] {
        total[y] += 1;
    }
    let parent = gini(&total, n);
    if parent <= 0.0 {
        return None;
    }
    let weighted_parent = n as f64 * parent;

    let mut left = vec![0usize; n_classes];
    let mut right = vec![0usize; n_classes];
    let mut best = f64::NEG_INFINITY;
    let mut ties: Vec<usize> = Vec::new();

    for pos in (start + 1)..end {
        left[ys[pos - 1]] += 1;
        if xs[pos - 1] == xs[pos] {
            continue;
        }
        for (r, (&t, &l)) in right.iter_mut().zip(total.iter().zip(left.iter())) {
            *r = t - l;
        }
        let n_left = pos - start;
        let n_right = end - pos;
        let improvement = weighted_parent
            - n_left as f64 * gini(&left, n_left)
            - n_right as f64 * gini(&right, n_right);

        if improvement > best + TIE_EPSILON {
            best = improvement;
            ties.clear();
            ties.push(pos);
        } else if (improvement - best).abs() <= TIE_EPSILON {
            ties.push(pos);
        }
    }

    let pos = match ties.len() {
        0 => return None,
        1 => ties[0],
        k => ties[rng.random_range(0..k)],
    };
    Some(SplitPoint { pos, threshold: midpoint(xs[pos - 1], xs[pos]), improvement: best })
}

impl SplitLearner for DecisionTreeSplitter {
    fn fit_binary_splits(
        &self,
        values: &[f64],
        labels: &[usize],
        max_leaves: usize,
    ) -> Result<Vec<f64>> {
        if values.len() != labels.len() {
            return Err(DriftError::Backend {
                message: format!(
                    "values and labels differ in length: {} != {}",
                    values.len(),
                    labels.len()
                ),
            });
        }
        if values.is_empty() {
            return Err(DriftError::Backend { message: "no samples to fit".into() });
        }
        if max_leaves < 2 {
            return Err(DriftError::Backend {
                message: format!("max_leaves must be at least 2, got {max_leaves}"),
            });
        }

        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        let xs: Vec<f64> = order.iter().map(|&i| values[i]).collect();
        let ys: Vec<usize> = order.iter().map(|&i| labels[i]).collect();
        let n_classes = ys.iter().copied().max().map_or(1, |m| m + 1);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut thresholds = vec![LEAF_THRESHOLD];
        let mut frontier = vec![Frontier {
            node: 0,
            start: 0,
            end: xs.len(),
            split: best_split(&xs, &ys, 0, xs.len(), n_classes, &mut rng),
        }];
        let mut leaves = 1;

        while leaves < max_leaves {
            let mut pick: Option<(usize, f64)> = None;
            for (idx, candidate) in frontier.iter().enumerate() {
                if let Some(split) = candidate.split {
                    if pick.map_or(true, |(_, best)| split.improvement > best) {
                        pick = Some((idx, split.improvement));
                    }
                }
            }
            let Some((idx, _)) = pick else { break };
            let candidate = frontier.remove(idx);
            let Some(split) = candidate.split else { break };

            thresholds[candidate.node] = split.threshold;
            let left = thresholds.len();
            thresholds.push(LEAF_THRESHOLD);
            let right = thresholds.len();
            thresholds.push(LEAF_THRESHOLD);

            frontier.push(Frontier {
                node: left,
                start: candidate.start,
                end: split.pos,
                split: best_split(&xs, &ys, candidate.start, split.pos, n_classes, &mut rng),
            });
            frontier.push(Frontier {
                node: right,
                start: split.pos,
                end: candidate.end,
                split: best_split(&xs, &ys, split.pos, candidate.end, n_classes, &mut rng),
            });
            leaves += 1;
        }

        Ok(thresholds)
    }
}
