//! Metric multidimensional scaling (SMACOF majorization).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vizlab_core::Matrix;

use crate::algorithms::kmeans::squared_euclidean;
use crate::error::AnalyticsError;

/// Parameters for an MDS fit. The seed fixes the initial configuration so
/// repeated fits on identical input are identical.
#[derive(Debug, Clone)]
pub struct MdsConfig {
    pub n_components: usize,
    pub seed: u64,
    pub max_iter: usize,
    /// Relative stress-decrease threshold for early stopping.
    pub eps: f64,
}

impl Default for MdsConfig {
    fn default() -> Self {
        Self {
            n_components: 2,
            seed: 42,
            max_iter: 300,
            eps: 1e-3,
        }
    }
}

/// A low-dimensional embedding with its residual stress.
#[derive(Debug, Clone)]
pub struct MdsEmbedding {
    /// One coordinate vector per input row.
    pub coords: Vec<Vec<f64>>,
    /// Sum of squared differences between input and embedded distances.
    pub stress: f64,
    pub iterations: usize,
}

/// Embed the rows of `data` using their pairwise Euclidean distances.
pub fn fit_euclidean(data: &Matrix, config: &MdsConfig) -> Result<MdsEmbedding, AnalyticsError> {
    let rows = data.rows();
    let n = rows.len();
    let mut diss = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = squared_euclidean(&rows[i], &rows[j]).sqrt();
            diss[i][j] = d;
            diss[j][i] = d;
        }
    }
    smacof(&diss, config)
}

/// Embed from a precomputed dissimilarity matrix.
///
/// The matrix must be square, symmetric, non-negative, with a zero diagonal.
pub fn fit_precomputed(
    diss: &[Vec<f64>],
    config: &MdsConfig,
) -> Result<MdsEmbedding, AnalyticsError> {
    let n = diss.len();
    if n == 0 {
        return Err(AnalyticsError::EmptyInput);
    }
    for (i, row) in diss.iter().enumerate() {
        if row.len() != n {
            return Err(AnalyticsError::InvalidDissimilarity(format!(
                "row {} has length {}, expected {}",
                i,
                row.len(),
                n
            )));
        }
        if row[i].abs() > 1e-9 {
            return Err(AnalyticsError::InvalidDissimilarity(format!(
                "non-zero diagonal at index {}",
                i
            )));
        }
        for (j, &v) in row.iter().enumerate() {
            if v < 0.0 {
                return Err(AnalyticsError::InvalidDissimilarity(format!(
                    "negative entry at ({}, {})",
                    i, j
                )));
            }
            if (v - diss[j][i]).abs() > 1e-9 {
                return Err(AnalyticsError::InvalidDissimilarity(format!(
                    "asymmetric at ({}, {})",
                    i, j
                )));
            }
        }
    }
    smacof(diss, config)
}

/// SMACOF iteration: seeded random start, Guttman transform updates,
/// stop when the relative stress decrease drops below `eps`.
fn smacof(diss: &[Vec<f64>], config: &MdsConfig) -> Result<MdsEmbedding, AnalyticsError> {
    let n = diss.len();
    if n == 0 {
        return Err(AnalyticsError::EmptyInput);
    }
    let m = config.n_components;
    if m == 0 {
        return Err(AnalyticsError::DimensionMismatch(
            "n_components must be at least 1".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut coords: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..m).map(|_| rng.gen_range(-0.5..0.5)).collect())
        .collect();

    let mut stress = stress_of(diss, &coords);
    let mut iterations = 0;

    for _ in 0..config.max_iter {
        iterations += 1;

        // Guttman transform: X <- (1/n) B(X) X.
        let dist = pairwise_distances(&coords);
        let mut next = vec![vec![0.0; m]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let ratio = if dist[i][j] > 1e-12 {
                    diss[i][j] / dist[i][j]
                } else {
                    0.0
                };
                for c in 0..m {
                    next[i][c] += ratio * (coords[i][c] - coords[j][c]);
                }
            }
            for c in 0..m {
                next[i][c] /= n as f64;
            }
        }
        coords = next;

        let new_stress = stress_of(diss, &coords);
        let decrease = stress - new_stress;
        stress = new_stress;
        if decrease < config.eps * stress.max(f64::EPSILON) {
            break;
        }
    }

    Ok(MdsEmbedding {
        coords,
        stress,
        iterations,
    })
}

fn pairwise_distances(coords: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = coords.len();
    let mut dist = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = squared_euclidean(&coords[i], &coords[j]).sqrt();
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }
    dist
}

fn stress_of(diss: &[Vec<f64>], coords: &[Vec<f64>]) -> f64 {
    let n = coords.len();
    let mut stress = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = squared_euclidean(&coords[i], &coords[j]).sqrt();
            let r = diss[i][j] - d;
            stress += r * r;
        }
    }
    stress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight_config() -> MdsConfig {
        MdsConfig {
            max_iter: 1000,
            eps: 1e-9,
            ..MdsConfig::default()
        }
    }

    /// Pairwise distances of a unit square.
    fn square_dissimilarity() -> Vec<Vec<f64>> {
        let corners = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let n = corners.len();
        let mut d = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                d[i][j] = squared_euclidean(&corners[i], &corners[j]).sqrt();
            }
        }
        d
    }

    #[test]
    fn square_distances_are_reproduced() {
        let diss = square_dissimilarity();
        let embedding = fit_precomputed(&diss, &tight_config()).unwrap();
        assert_eq!(embedding.coords.len(), 4);

        let dist = pairwise_distances(&embedding.coords);
        for i in 0..4 {
            for j in 0..4 {
                assert!(
                    (dist[i][j] - diss[i][j]).abs() < 0.1,
                    "d[{}][{}] = {}, expected {}",
                    i,
                    j,
                    dist[i][j],
                    diss[i][j]
                );
            }
        }
    }

    #[test]
    fn embedding_is_deterministic() {
        let diss = square_dissimilarity();
        let a = fit_precomputed(&diss, &MdsConfig::default()).unwrap();
        let b = fit_precomputed(&diss, &MdsConfig::default()).unwrap();
        assert_eq!(a.coords, b.coords);
        assert_eq!(a.stress, b.stress);
    }

    #[test]
    fn more_iterations_do_not_increase_stress() {
        let diss = square_dissimilarity();
        let short = fit_precomputed(
            &diss,
            &MdsConfig {
                max_iter: 1,
                ..MdsConfig::default()
            },
        )
        .unwrap();
        let long = fit_precomputed(&diss, &tight_config()).unwrap();
        assert!(long.stress <= short.stress);
    }

    #[test]
    fn euclidean_embedding_separates_far_groups() {
        let mut rows = Vec::new();
        for i in 0..6 {
            rows.push(vec![(i as f64) * 0.1, 0.0, 0.0]);
        }
        for i in 0..6 {
            rows.push(vec![100.0 + (i as f64) * 0.1, 100.0, 100.0]);
        }
        let cols = (0..3).map(|i| format!("f{}", i)).collect();
        let data = Matrix::new(cols, rows).unwrap();

        let embedding = fit_euclidean(&data, &tight_config()).unwrap();
        assert_eq!(embedding.coords.len(), 12);
        assert_eq!(embedding.coords[0].len(), 2);

        // Distance between the two group centroids must dwarf the spread
        // within each group.
        let centroid = |range: std::ops::Range<usize>| {
            let mut c = vec![0.0; 2];
            for i in range.clone() {
                for (x, v) in c.iter_mut().zip(embedding.coords[i].iter()) {
                    *x += v / range.len() as f64;
                }
            }
            c
        };
        let c0 = centroid(0..6);
        let c1 = centroid(6..12);
        let between = squared_euclidean(&c0, &c1).sqrt();
        assert!(between > 50.0, "between-group distance = {}", between);
    }

    #[test]
    fn identical_points_collapse_to_origin() {
        let diss = vec![vec![0.0; 5]; 5];
        let embedding = fit_precomputed(&diss, &MdsConfig::default()).unwrap();
        assert_eq!(embedding.stress, 0.0);
        for coord in &embedding.coords {
            assert!(coord.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn non_square_input_is_rejected() {
        let diss = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        assert!(matches!(
            fit_precomputed(&diss, &MdsConfig::default()),
            Err(AnalyticsError::InvalidDissimilarity(_))
        ));
    }

    #[test]
    fn asymmetric_input_is_rejected() {
        let diss = vec![vec![0.0, 1.0], vec![2.0, 0.0]];
        assert!(matches!(
            fit_precomputed(&diss, &MdsConfig::default()),
            Err(AnalyticsError::InvalidDissimilarity(_))
        ));
    }

    #[test]
    fn non_zero_diagonal_is_rejected() {
        let diss = vec![vec![0.5, 1.0], vec![1.0, 0.0]];
        assert!(matches!(
            fit_precomputed(&diss, &MdsConfig::default()),
            Err(AnalyticsError::InvalidDissimilarity(_))
        ));
    }

    #[test]
    fn negative_entries_are_rejected() {
        let diss = vec![vec![0.0, -1.0], vec![-1.0, 0.0]];
        assert!(matches!(
            fit_precomputed(&diss, &MdsConfig::default()),
            Err(AnalyticsError::InvalidDissimilarity(_))
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        let diss: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            fit_precomputed(&diss, &MdsConfig::default()),
            Err(AnalyticsError::EmptyInput)
        ));
    }
}
