//! One-dimensional k-means for the `kmeans` strategy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{DriftConfig, KMeansConfig};
use crate::error::{DriftError, Result};

/// Clusters a numeric sample and returns the centers.
pub trait Clusterer: Send + Sync {
    /// Cluster `values` into at most `k` groups; centers sorted ascending.
    fn cluster_1d(&self, values: &[f64], k: usize) -> Result<Vec<f64>>;
}

/// Lloyd's algorithm with k-means++ seeding, best of `n_init` restarts.
///
/// `k` is capped at the number of distinct values.
#[derive(Clone, Debug)]
pub struct KMeans1d {
    seed: u64,
    params: KMeansConfig,
}

impl KMeans1d {
    /// Create with default parameters
    pub fn new(seed: u64) -> Self {
        Self { seed, params: KMeansConfig::default() }
    }

    /// Create from the drift config
    pub fn from_config(config: &DriftConfig) -> Self {
        Self { seed: config.seed, params: config.kmeans.clone() }
    }

    fn plus_plus_init(values: &[f64], k: usize, rng: &mut StdRng) -> Vec<f64> {
        let mut centers = Vec::with_capacity(k);
        let first = values[rng.random_range(0..values.len())];
        centers.push(first);
        let mut dist: Vec<f64> = values.iter().map(|&x| (x - first).powi(2)).collect();

        while centers.len() < k {
            let total: f64 = dist.iter().sum();
            if total <= 0.0 {
                break;
            }
            let mut r = rng.random::<f64>() * total;
            let mut chosen = None;
            for (i, &d) in dist.iter().enumerate() {
                if d <= 0.0 {
                    continue;
                }
                chosen = Some(i);
                r -= d;
                if r < 0.0 {
                    break;
                }
            }
            let Some(i) = chosen else { break };
            let center = values[i];
            centers.push(center);
            for (d, &x) in dist.iter_mut().zip(values) {
                *d = d.min((x - center).powi(2));
            }
        }
        centers
    }

    fn nearest(centers: &[f64], x: f64) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (j, &c) in centers.iter().enumerate() {
            let d = (x - c).abs();
            if d < best_dist {
                best = j;
                best_dist = d;
            }
        }
        best
    }

    fn lloyd(&self, values: &[f64], mut centers: Vec<f64>, tol: f64) -> (Vec<f64>, f64) {
        let k = centers.len();
        for _ in 0..self.params.max_iter {
            let mut sums = vec![0.0; k];
            let mut counts = vec![0usize; k];
            for &x in values {
                let j = Self::nearest(&centers, x);
                sums[j] += x;
                counts[j] += 1;
            }
            let mut shift = 0.0;
            for j in 0..k {
                // empty clusters keep their previous center
                if counts[j] > 0 {
                    let updated = sums[j] / counts[j] as f64;
                    shift += (updated - centers[j]).powi(2);
                    centers[j] = updated;
                }
            }
            if shift <= tol {
                break;
            }
        }
        let inertia = values
            .iter()
            .map(|&x| (x - centers[Self::nearest(&centers, x)]).powi(2))
            .sum();
        (centers, inertia)
    }
}

impl Clusterer for KMeans1d {
    fn cluster_1d(&self, values: &[f64], k: usize) -> Result<Vec<f64>> {
        if values.is_empty() {
            return Err(DriftError::Backend { message: "no values to cluster".into() });
        }
        if k == 0 {
            return Err(DriftError::Backend { message: "cluster count must be at least 1".into() });
        }
        if values.iter().any(|x| !x.is_finite()) {
            return Err(DriftError::Backend {
                message: "k-means requires finite values".into(),
            });
        }

        let mut distinct = values.to_vec();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        let k = k.min(distinct.len());

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
        let tol = self.params.tol * variance;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<(f64, Vec<f64>)> = None;
        for _ in 0..self.params.n_init.max(1) {
            let init = Self::plus_plus_init(values, k, &mut rng);
            let (centers, inertia) = self.lloyd(values, init, tol);
            if best.as_ref().map_or(true, |(b, _)| inertia < *b) {
                best = Some((inertia, centers));
            }
        }

        let mut centers = best.map(|(_, c)| c).unwrap_or_default();
        centers.sort_by(f64::total_cmp);
        Ok(centers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_two_well_separated_groups() {
        let centers = KMeans1d::new(42).cluster_1d(&[1.0, 2.0, 3.0, 10.0, 11.0, 12.0], 2).unwrap();
        assert_eq!(centers.len(), 2);
        assert_abs_diff_eq!(centers[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(centers[1], 11.0, epsilon = 1e-9);
    }

    #[test]
    fn test_k_capped_at_distinct_values() {
        let centers = KMeans1d::new(42).cluster_1d(&[5.0, 5.0, 7.0], 4).unwrap();
        assert_eq!(centers, vec![5.0, 7.0]);
    }

    #[test]
    fn test_sorted_output() {
        let values: Vec<f64> = (0..30).map(|i| f64::from((i * 7) % 13)).collect();
        let centers = KMeans1d::new(3).cluster_1d(&values, 4).unwrap();
        assert!(centers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let values: Vec<f64> = (0..40).map(|i| f64::from(i * i % 17)).collect();
        let a = KMeans1d::new(5).cluster_1d(&values, 3).unwrap();
        let b = KMeans1d::new(5).cluster_1d(&values, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_clusters_is_error() {
        assert!(KMeans1d::new(42).cluster_1d(&[1.0], 0).is_err());
    }
}
