//! Matrix type for 2D numeric data.

use super::Vector;
use crate::error::{GaussBayesError, Result};
use serde::{Deserialize, Serialize};

/// Pivot magnitude below which a matrix is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// A 2D matrix of floating-point values (row-major storage).
///
/// # Examples
///
/// ```
/// use gaussbayes::primitives::Matrix;
///
/// let m = Matrix::from_vec(2, 2, vec![2.0, 0.0, 0.0, 2.0]).expect("2x2 data");
/// assert_eq!(m.shape(), (2, 2));
/// assert!((m.determinant() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a new matrix from a vector of data.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if data length doesn't match rows * cols.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(GaussBayesError::DimensionMismatch {
                expected: format!("{rows}x{cols}={} values", rows * cols),
                actual: format!("{} values", data.len()),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GaussBayesError::dimension_mismatch(
                    &format!("row {i}"),
                    cols,
                    row.len(),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// True when rows == cols.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Gets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    /// Sets element at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns the main diagonal.
    #[must_use]
    pub fn diagonal(&self) -> Vector<T> {
        let n = self.rows.min(self.cols);
        Vector::from_vec((0..n).map(|i| self.get(i, i)).collect())
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Matrix<f64> {
    /// Creates a matrix of zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn eye(n: usize) -> Self {
        Self::from_diag(&vec![1.0; n])
    }

    /// Creates a square diagonal matrix.
    #[must_use]
    pub fn from_diag(diag: &[f64]) -> Self {
        let n = diag.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diag.iter().enumerate() {
            m.set(i, i, d);
        }
        m
    }

    /// Transposes the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix-vector multiplication.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn matvec(&self, vec: &[f64]) -> Result<Vector<f64>> {
        if self.cols != vec.len() {
            return Err(GaussBayesError::dimension_mismatch(
                "matvec",
                self.cols,
                vec.len(),
            ));
        }

        let result: Vec<f64> = (0..self.rows)
            .map(|i| {
                let start = i * self.cols;
                self.data[start..start + self.cols]
                    .iter()
                    .zip(vec)
                    .map(|(a, b)| a * b)
                    .sum()
            })
            .collect();

        Ok(Vector::from_vec(result))
    }

    /// Computes the quadratic form `xᵗ A x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or `x` has the wrong length.
    pub fn quadratic_form(&self, x: &[f64]) -> Result<f64> {
        if !self.is_square() {
            return Err(GaussBayesError::dimension_mismatch(
                "square matrix cols",
                self.rows,
                self.cols,
            ));
        }
        let ax = self.matvec(x)?;
        ax.dot_slice(x)
    }

    /// Adds another matrix element-wise.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions don't match.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(GaussBayesError::DimensionMismatch {
                expected: format!("{}x{}", self.rows, self.cols),
                actual: format!("{}x{}", other.rows, other.cols),
            });
        }
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| op(a, b))
                .collect(),
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Multiplies each element by a scalar.
    #[must_use]
    pub fn mul_scalar(&self, scalar: f64) -> Self {
        Self {
            data: self.data.iter().map(|x| x * scalar).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Determinant via LU decomposition with partial pivoting.
    ///
    /// Returns `NaN` for non-square matrices.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        if !self.is_square() {
            return f64::NAN;
        }
        let n = self.rows;
        let mut a = self.data.clone();
        let mut det = 1.0;

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&i, &j| a[i * n + col].abs().total_cmp(&a[j * n + col].abs()))
                .unwrap_or(col);
            if a[pivot * n + col] == 0.0 {
                return 0.0;
            }
            if pivot != col {
                for k in 0..n {
                    a.swap(col * n + k, pivot * n + k);
                }
                det = -det;
            }
            let p = a[col * n + col];
            det *= p;
            for row in (col + 1)..n {
                let factor = a[row * n + col] / p;
                for k in col..n {
                    a[row * n + k] -= factor * a[col * n + k];
                }
            }
        }
        det
    }

    /// Inverse via Gauss-Jordan elimination with partial pivoting.
    ///
    /// # Errors
    ///
    /// Returns `SingularCovariance` if a pivot (or the determinant) is
    /// smaller than [`SINGULAR_EPSILON`], and `DimensionMismatch` for
    /// non-square input.
    pub fn inverse(&self) -> Result<Self> {
        if !self.is_square() {
            return Err(GaussBayesError::dimension_mismatch(
                "square matrix cols",
                self.rows,
                self.cols,
            ));
        }
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(GaussBayesError::SingularCovariance { det });
        }

        let n = self.rows;
        let mut a = self.data.clone();
        let mut inv = Self::eye(n).data;

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&i, &j| a[i * n + col].abs().total_cmp(&a[j * n + col].abs()))
                .unwrap_or(col);
            if a[pivot * n + col].abs() < SINGULAR_EPSILON {
                return Err(GaussBayesError::SingularCovariance { det });
            }
            if pivot != col {
                for k in 0..n {
                    a.swap(col * n + k, pivot * n + k);
                    inv.swap(col * n + k, pivot * n + k);
                }
            }

            let p = a[col * n + col];
            for k in 0..n {
                a[col * n + k] /= p;
                inv[col * n + k] /= p;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a[row * n + col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..n {
                    a[row * n + k] -= factor * a[col * n + k];
                    inv[row * n + k] -= factor * inv[col * n + k];
                }
            }
        }

        Ok(Self {
            data: inv,
            rows: n,
            cols: n,
        })
    }

    /// Element-wise equality within an absolute tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    /// True if the matrix is symmetric within `tol`.
    #[must_use]
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.approx_eq(&self.transpose(), tol)
    }

    /// True if the matrix is a scaled identity: off-diagonal entries are
    /// zero and all diagonal entries equal the first one, within `tol`.
    #[must_use]
    pub fn is_scaled_identity(&self, tol: f64) -> bool {
        if !self.is_square() || self.rows == 0 {
            return false;
        }
        let scale = self.get(0, 0);
        (0..self.rows).all(|i| {
            (0..self.cols).all(|j| {
                let expected = if i == j { scale } else { 0.0 };
                (self.get(i, j) - expected).abs() <= tol
            })
        })
    }
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
