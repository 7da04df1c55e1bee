//! Principal component analysis via covariance eigendecomposition.

use vizlab_core::Matrix;

use crate::algorithms::preprocess::column_means;
use crate::error::AnalyticsError;

/// Convergence bound on the off-diagonal norm of the Jacobi iteration.
const JACOBI_TOLERANCE: f64 = 1e-12;
/// Upper bound on Jacobi sweeps; reached only for pathological input.
const JACOBI_MAX_SWEEPS: usize = 100;

/// A fitted PCA model: eigenvalues and component loadings, sorted by
/// explained variance descending.
#[derive(Debug, Clone)]
pub struct Pca {
    eigenvalues: Vec<f64>,
    /// `components[c][f]` is the loading of feature `f` on component `c`.
    components: Vec<Vec<f64>>,
    means: Vec<f64>,
}

impl Pca {
    /// Fit on the rows of `data` (callers standardize first).
    pub fn fit(data: &Matrix) -> Result<Self, AnalyticsError> {
        if data.n_rows() < 2 {
            return Err(AnalyticsError::DimensionMismatch(
                "PCA requires at least 2 rows".to_string(),
            ));
        }

        let means = column_means(data);
        let cov = covariance_matrix(data, &means);
        let (eigenvalues, vectors) = jacobi_eigen(cov);

        // Sort eigenpairs by eigenvalue descending; clamp the tiny negatives
        // the iteration can leave behind.
        let p = eigenvalues.len();
        let mut order: Vec<usize> = (0..p).collect();
        order.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let sorted_eigenvalues: Vec<f64> =
            order.iter().map(|&c| eigenvalues[c].max(0.0)).collect();
        let components: Vec<Vec<f64>> = order
            .iter()
            .map(|&c| (0..p).map(|f| vectors[f][c]).collect())
            .collect();

        Ok(Self {
            eigenvalues: sorted_eigenvalues,
            components,
            means,
        })
    }

    /// Explained variance per component, descending.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Fraction of total variance explained by each component.
    pub fn explained_variance_ratio(&self) -> Vec<f64> {
        let total: f64 = self.eigenvalues.iter().sum();
        if total <= 0.0 {
            return vec![0.0; self.eigenvalues.len()];
        }
        self.eigenvalues.iter().map(|&v| v / total).collect()
    }

    /// Component loadings, component-major.
    pub fn components(&self) -> &[Vec<f64>] {
        &self.components
    }

    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Project rows onto all components.
    pub fn transform(&self, data: &Matrix) -> Result<Vec<Vec<f64>>, AnalyticsError> {
        if data.n_cols() != self.means.len() {
            return Err(AnalyticsError::DimensionMismatch(format!(
                "expected {} features, got {}",
                self.means.len(),
                data.n_cols()
            )));
        }

        Ok(data
            .rows()
            .iter()
            .map(|row| {
                self.components
                    .iter()
                    .map(|comp| {
                        row.iter()
                            .zip(comp.iter().zip(self.means.iter()))
                            .map(|(&v, (&c, &m))| (v - m) * c)
                            .sum()
                    })
                    .collect()
            })
            .collect())
    }

    /// Per-feature sum of squared loadings over the top `d` components.
    ///
    /// Used to rank features by how much they drive the leading components;
    /// `d` is clamped to the component count.
    pub fn squared_loading_sums(&self, d: usize) -> Vec<f64> {
        let d = d.min(self.components.len());
        let p = self.means.len();
        (0..p)
            .map(|f| self.components[..d].iter().map(|comp| comp[f] * comp[f]).sum())
            .collect()
    }
}

/// Sample covariance matrix (n - 1 denominator).
fn covariance_matrix(data: &Matrix, means: &[f64]) -> Vec<Vec<f64>> {
    let p = data.n_cols();
    let denom = (data.n_rows() - 1) as f64;
    let mut cov = vec![vec![0.0; p]; p];

    for row in data.rows() {
        for i in 0..p {
            let di = row[i] - means[i];
            for j in i..p {
                cov[i][j] += di * (row[j] - means[j]);
            }
        }
    }
    for i in 0..p {
        for j in i..p {
            cov[i][j] /= denom;
            cov[j][i] = cov[i][j];
        }
    }
    cov
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns (eigenvalues, V) where the columns of V are the corresponding
/// eigenvectors.
fn jacobi_eigen(mut a: Vec<Vec<f64>>) -> (Vec<f64>, Vec<Vec<f64>>) {
    let p = a.len();
    let mut v = vec![vec![0.0; p]; p];
    for (i, row) in v.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off: f64 = (0..p)
            .flat_map(|i| ((i + 1)..p).map(move |j| (i, j)))
            .map(|(i, j)| a[i][j] * a[i][j])
            .sum();
        if off < JACOBI_TOLERANCE {
            break;
        }

        for i in 0..p - 1 {
            for j in (i + 1)..p {
                if a[i][j].abs() < 1e-300 {
                    continue;
                }

                let theta = (a[j][j] - a[i][i]) / (2.0 * a[i][j]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                // A <- Gᵀ A G, column part then row part.
                for k in 0..p {
                    let aki = a[k][i];
                    let akj = a[k][j];
                    a[k][i] = c * aki - s * akj;
                    a[k][j] = s * aki + c * akj;
                }
                for k in 0..p {
                    let aik = a[i][k];
                    let ajk = a[j][k];
                    a[i][k] = c * aik - s * ajk;
                    a[j][k] = s * aik + c * ajk;
                }
                // V <- V G accumulates the eigenvectors.
                for row in v.iter_mut() {
                    let vki = row[i];
                    let vkj = row[j];
                    row[i] = c * vki - s * vkj;
                    row[j] = s * vki + c * vkj;
                }
            }
        }
    }

    let eigenvalues = (0..p).map(|i| a[i][i]).collect();
    (eigenvalues, v)
}
