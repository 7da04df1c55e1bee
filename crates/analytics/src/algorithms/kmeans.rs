use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vizlab_core::Matrix;

use crate::error::AnalyticsError;

/// Parameters for a K-means run.
///
/// The seed and re-initialization count are fixed so that repeated fits on
/// identical input produce identical results.
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters.
    pub k: usize,
    /// Upper bound on Lloyd's iterations per initialization.
    pub max_iter: usize,
    /// Number of seeded initializations; the lowest-inertia run wins.
    pub n_init: usize,
    /// RNG seed for centroid sampling.
    pub seed: u64,
}

impl KMeansConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 300,
            n_init: 10,
            seed: 42,
        }
    }

    /// Run Lloyd's K-means algorithm with K-means++ initialization.
    ///
    /// Each of the `n_init` runs starts from a fresh D²-weighted sample;
    /// the run with the lowest inertia is returned.
    pub fn fit(&self, data: &Matrix) -> Result<KMeansFit, AnalyticsError> {
        let n = data.n_rows();
        if self.k == 0 || self.k > n {
            return Err(AnalyticsError::InvalidK { got: self.k, max: n });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut best = lloyd(data, self.k, self.max_iter, &mut rng);
        for _ in 1..self.n_init {
            let fit = lloyd(data, self.k, self.max_iter, &mut rng);
            if fit.inertia < best.inertia {
                best = fit;
            }
        }
        Ok(best)
    }
}

/// Result of a full batch K-means run.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Number of clusters.
    pub k: usize,
    /// Cluster index of each row, in row order.
    pub labels: Vec<usize>,
    /// Final centroid vectors, indexed by cluster id.
    pub centroids: Vec<Vec<f64>>,
    /// Sum of squared distances from each row to its assigned centroid.
    pub inertia: f64,
    /// Number of Lloyd's iterations performed in the winning run.
    pub iterations: usize,
}

/// One seeded initialization followed by Lloyd iterations to convergence.
fn lloyd(data: &Matrix, k: usize, max_iter: usize, rng: &mut StdRng) -> KMeansFit {
    let rows = data.rows();
    let n = rows.len();
    let dim = data.n_cols();

    let mut centroids = kmeanspp_init(rows, k, rng);
    let mut labels = vec![0usize; n];
    let mut iterations = 0;

    for _ in 0..max_iter {
        iterations += 1;

        // Assignment step: assign each row to its nearest centroid.
        let mut changed = false;
        for (i, row) in rows.iter().enumerate() {
            let nearest = nearest_centroid(row, &centroids);
            if labels[i] != nearest {
                labels[i] = nearest;
                changed = true;
            }
        }

        // If no assignments changed, we've converged.
        if !changed && iterations > 1 {
            break;
        }

        // Update step: recompute centroids as mean of assigned rows.
        let mut new_centroids = vec![vec![0.0; dim]; k];
        let mut counts = vec![0usize; k];

        for (i, row) in rows.iter().enumerate() {
            let cluster = labels[i];
            counts[cluster] += 1;
            for (j, &val) in row.iter().enumerate() {
                new_centroids[cluster][j] += val;
            }
        }

        for (c, centroid) in new_centroids.iter_mut().enumerate() {
            if counts[c] > 0 {
                let count = counts[c] as f64;
                for val in centroid.iter_mut() {
                    *val /= count;
                }
            } else {
                // Empty cluster: keep previous centroid.
                centroid.clone_from(&centroids[c]);
            }
        }

        centroids = new_centroids;
    }

    let inertia = labels
        .iter()
        .zip(rows.iter())
        .map(|(&c, row)| squared_euclidean(row, &centroids[c]))
        .sum();

    KMeansFit {
        k,
        labels,
        centroids,
        inertia,
        iterations,
    }
}

// ── Internal helpers ─────────────────────────────────────────

/// K-means++ initialization: D²-weighted sampling of k centroids.
fn kmeanspp_init(rows: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let n = rows.len();

    let first = rows[rng.gen_range(0..n)].clone();
    // Minimum squared distance of each row to any chosen centroid so far.
    let mut dists: Vec<f64> = rows.iter().map(|r| squared_euclidean(r, &first)).collect();
    let mut centroids = vec![first];

    for _ in 1..k {
        let total: f64 = dists.iter().sum();
        let idx = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut pick = n - 1;
            for (i, &d) in dists.iter().enumerate() {
                if target <= d {
                    pick = i;
                    break;
                }
                target -= d;
            }
            pick
        } else {
            // Every row coincides with an existing centroid.
            rng.gen_range(0..n)
        };

        let next = rows[idx].clone();
        for (i, row) in rows.iter().enumerate() {
            let d = squared_euclidean(row, &next);
            if d < dists[i] {
                dists[i] = d;
            }
        }
        centroids.push(next);
    }

    centroids
}

/// Find the index of the nearest centroid.
fn nearest_centroid(row: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::MAX;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = squared_euclidean(row, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }
    best_idx
}

/// Squared Euclidean distance.
#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
