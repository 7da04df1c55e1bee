//! Column statistics and z-score standardization.

use vizlab_core::Matrix;

/// Per-column arithmetic means.
pub fn column_means(data: &Matrix) -> Vec<f64> {
    let n = data.n_rows() as f64;
    let mut means = vec![0.0; data.n_cols()];
    for row in data.rows() {
        for (j, &v) in row.iter().enumerate() {
            means[j] += v;
        }
    }
    for m in means.iter_mut() {
        *m /= n;
    }
    means
}

/// Per-column population standard deviations.
pub fn column_stds(data: &Matrix, means: &[f64]) -> Vec<f64> {
    let n = data.n_rows() as f64;
    let mut vars = vec![0.0; data.n_cols()];
    for row in data.rows() {
        for (j, &v) in row.iter().enumerate() {
            let d = v - means[j];
            vars[j] += d * d;
        }
    }
    vars.into_iter().map(|v| (v / n).sqrt()).collect()
}

/// Z-score standardization: zero mean, unit variance per column.
///
/// Constant columns map to all zeros rather than dividing by zero.
pub fn standardize(data: &Matrix) -> Matrix {
    let means = column_means(data);
    let stds = column_stds(data, &means);

    let rows = data
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, &v)| {
                    if stds[j] > 0.0 {
                        (v - means[j]) / stds[j]
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();

    // Input matrix upholds the shape invariant, so this cannot fail.
    Matrix::new(data.column_names().to_vec(), rows)
        .unwrap_or_else(|_| unreachable!("standardize preserves matrix shape"))
}

/// Pearson correlation matrix between columns.
///
/// Pairs involving a constant column get correlation 0 (1 on the diagonal).
pub fn correlation_matrix(data: &Matrix) -> Vec<Vec<f64>> {
    let p = data.n_cols();
    let n = data.n_rows() as f64;
    let means = column_means(data);
    let stds = column_stds(data, &means);

    let mut corr = vec![vec![0.0; p]; p];
    for i in 0..p {
        corr[i][i] = 1.0;
        for j in (i + 1)..p {
            let mut cov = 0.0;
            for row in data.rows() {
                cov += (row[i] - means[i]) * (row[j] - means[j]);
            }
            cov /= n;
            let denom = stds[i] * stds[j];
            let r = if denom > 0.0 { cov / denom } else { 0.0 };
            corr[i][j] = r;
            corr[j][i] = r;
        }
    }
    corr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> Matrix {
        let cols = (0..rows[0].len()).map(|i| format!("c{}", i)).collect();
        Matrix::new(cols, rows).unwrap()
    }

    #[test]
    fn standardized_columns_have_zero_mean_unit_variance() {
        let m = matrix(vec![
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 30.0],
            vec![4.0, 40.0],
        ]);
        let z = standardize(&m);

        let means = column_means(&z);
        let stds = column_stds(&z, &means);
        for j in 0..2 {
            assert!(means[j].abs() < 1e-12, "mean[{}] = {}", j, means[j]);
            assert!((stds[j] - 1.0).abs() < 1e-12, "std[{}] = {}", j, stds[j]);
        }
    }

    #[test]
    fn constant_column_standardizes_to_zeros() {
        let m = matrix(vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]]);
        let z = standardize(&m);
        for row in z.rows() {
            assert_eq!(row[0], 0.0);
        }
    }

    #[test]
    fn correlation_of_identical_columns_is_one() {
        let m = matrix(vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]]);
        let corr = correlation_matrix(&m);
        assert!((corr[0][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_of_inverted_columns_is_minus_one() {
        let m = matrix(vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]]);
        let corr = correlation_matrix(&m);
        assert!((corr[0][1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let m = matrix(vec![
            vec![1.0, 4.0, 2.0],
            vec![2.0, 3.0, 8.0],
            vec![3.0, 7.0, 1.0],
            vec![4.0, 2.0, 5.0],
        ]);
        let corr = correlation_matrix(&m);
        for i in 0..3 {
            assert_eq!(corr[i][i], 1.0);
            for j in 0..3 {
                assert!((corr[i][j] - corr[j][i]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn constant_column_correlation_is_zero() {
        let m = matrix(vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]]);
        let corr = correlation_matrix(&m);
        assert_eq!(corr[0][1], 0.0);
        assert_eq!(corr[0][0], 1.0);
    }
}
