//! Vector type for 1D numeric data.

use crate::error::{GaussBayesError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A 1D vector of floating-point values.
///
/// # Examples
///
/// ```
/// use gaussbayes::primitives::Vector;
///
/// let v = Vector::from_vec(vec![3.0, 4.0]);
/// assert_eq!(v.len(), 2);
/// assert!((v.norm_squared() - 25.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Copy> Vector<T> {
    /// Creates a vector taking ownership of the data.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the vector, returning its data.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl Vector<f64> {
    /// Creates a vector of zeros.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    /// Dot product.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the lengths differ.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.len(), other.len());
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Dot product against a raw slice, checking lengths.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the lengths differ.
    pub fn dot_slice(&self, other: &[f64]) -> Result<f64> {
        if self.len() != other.len() {
            return Err(GaussBayesError::dimension_mismatch(
                "vector",
                self.len(),
                other.len(),
            ));
        }
        Ok(self.data.iter().zip(other).map(|(a, b)| a * b).sum())
    }

    /// Squared Euclidean norm.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum()
    }

    /// Element-wise difference `self - other`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the lengths differ.
    pub fn checked_sub(&self, other: &[f64]) -> Result<Self> {
        if self.len() != other.len() {
            return Err(GaussBayesError::dimension_mismatch(
                "vector",
                self.len(),
                other.len(),
            ));
        }
        Ok(Self {
            data: self.data.iter().zip(other).map(|(a, b)| a - b).collect(),
        })
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}
