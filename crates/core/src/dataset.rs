use indexmap::IndexMap;

use crate::error::VizlabError;

/// A raw CSV record with column order preserved.
pub type Record = IndexMap<String, String>;

/// Row-major numeric observation matrix with named columns.
///
/// Invariant: at least one row, at least one column, all rows the same width.
/// Enforced at construction, so every consumer can rely on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, VizlabError> {
        if columns.is_empty() {
            return Err(VizlabError::EmptyDataset("no columns".to_string()));
        }
        if rows.is_empty() {
            return Err(VizlabError::EmptyDataset("no rows".to_string()));
        }
        for row in &rows {
            if row.len() != columns.len() {
                return Err(VizlabError::RaggedRow {
                    expected: columns.len(),
                    got: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Values of column `j` across all rows.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[j]).collect()
    }

    /// New matrix restricted to the given column indices (in the given order).
    pub fn select_columns(&self, indices: &[usize]) -> Result<Matrix, VizlabError> {
        for &j in indices {
            if j >= self.n_cols() {
                return Err(VizlabError::Other(format!(
                    "column index {} out of range (matrix has {} columns)",
                    j,
                    self.n_cols()
                )));
            }
        }
        let columns = indices.iter().map(|&j| self.columns[j].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&j| r[j]).collect())
            .collect();
        Matrix::new(columns, rows)
    }
}

/// The loaded dataset: full string records plus the numeric feature matrix.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All retained records, raw string values, column order preserved.
    pub records: Vec<Record>,
    /// Numeric feature matrix, one row per retained record.
    pub features: Matrix,
    /// Column names not part of the numeric feature set.
    pub categorical_columns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matrix_rejects_empty_rows() {
        let err = Matrix::new(names(&["a"]), vec![]);
        assert!(matches!(err, Err(VizlabError::EmptyDataset(_))));
    }

    #[test]
    fn matrix_rejects_empty_columns() {
        let err = Matrix::new(vec![], vec![vec![]]);
        assert!(matches!(err, Err(VizlabError::EmptyDataset(_))));
    }

    #[test]
    fn matrix_rejects_ragged_rows() {
        let err = Matrix::new(names(&["a", "b"]), vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(err, Err(VizlabError::RaggedRow { expected: 2, got: 1 })));
    }

    #[test]
    fn column_extraction() {
        let m = Matrix::new(
            names(&["a", "b"]),
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
        )
        .unwrap();
        assert_eq!(m.column(1), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn select_columns_reorders() {
        let m = Matrix::new(names(&["a", "b", "c"]), vec![vec![1.0, 2.0, 3.0]]).unwrap();
        let sub = m.select_columns(&[2, 0]).unwrap();
        assert_eq!(sub.column_names(), &["c".to_string(), "a".to_string()]);
        assert_eq!(sub.rows()[0], vec![3.0, 1.0]);
    }

    #[test]
    fn select_columns_out_of_range() {
        let m = Matrix::new(names(&["a"]), vec![vec![1.0]]).unwrap();
        assert!(m.select_columns(&[1]).is_err());
    }
}
