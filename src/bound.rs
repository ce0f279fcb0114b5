//! Bhattacharyya upper bound on the two-class Bayes error.
//!
//! ```text
//! Σβ = (1-β)Σ0 + βΣ1
//! k  = β(1-β)/2 · (μ0-μ1)ᵗ Σβ⁻¹ (μ0-μ1) + ½ ln( |Σβ| / (|Σ0|^(1-β) |Σ1|^β) )
//! P(error) <= sqrt(P0 P1) · exp(-k)
//! ```
//!
//! β is fixed at 0.5.

use crate::distribution::Distribution;
use crate::error::{GaussBayesError, Result};
use serde::{Deserialize, Serialize};

/// Weighting between the two covariances.
pub const BHATTACHARYYA_BETA: f64 = 0.5;

/// Result of [`bhattacharyya_bound`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BhattacharyyaBound {
    /// β used for the covariance mix.
    pub beta: f64,
    /// Bhattacharyya distance `k`.
    pub k: f64,
    /// Upper bound on the probability of error.
    pub error_bound: f64,
}

/// Computes the Bhattacharyya bound for two classes and their priors.
///
/// # Errors
///
/// - `DimensionMismatch` if the classes disagree on dimensionality
/// - `SingularCovariance` if `Σ0`, `Σ1`, or `Σβ` has a non-positive
///   determinant or cannot be inverted
/// - `InvalidArgument` for a non-positive or non-finite prior
///
/// # Examples
///
/// ```
/// use gaussbayes::bound::bhattacharyya_bound;
/// use gaussbayes::distribution::{Distribution, IdGenerator};
/// use gaussbayes::primitives::Matrix;
///
/// let mut ids = IdGenerator::new();
/// let a = Distribution::with_parameters(&mut ids, vec![0.0, 0.0], Matrix::eye(2), "a").unwrap();
/// let b = Distribution::with_parameters(&mut ids, vec![2.0, 0.0], Matrix::eye(2), "b").unwrap();
///
/// let bound = bhattacharyya_bound(&a, &b, 0.5, 0.5).unwrap();
/// assert!((bound.k - 0.5).abs() < 1e-12);
/// ```
pub fn bhattacharyya_bound(
    first: &Distribution,
    second: &Distribution,
    p0: f64,
    p1: f64,
) -> Result<BhattacharyyaBound> {
    if first.dimensions() != second.dimensions() {
        return Err(GaussBayesError::dimension_mismatch(
            "class dimensions",
            first.dimensions(),
            second.dimensions(),
        ));
    }
    for p in [p0, p1] {
        if !(p > 0.0 && p.is_finite()) {
            return Err(GaussBayesError::invalid_argument("prior", p, "a finite value > 0"));
        }
    }

    let beta = BHATTACHARYYA_BETA;
    let (c0, c1) = (first.covariance(), second.covariance());
    let mixed = c0.mul_scalar(1.0 - beta).add(&c1.mul_scalar(beta))?;

    let det0 = positive_determinant(c0.determinant())?;
    let det1 = positive_determinant(c1.determinant())?;
    let det_mixed = positive_determinant(mixed.determinant())?;

    let diff = first.mean().checked_sub(second.mean().as_slice())?;
    let mahalanobis = mixed.inverse()?.quadratic_form(diff.as_slice())?;

    let k = beta * (1.0 - beta) / 2.0 * mahalanobis
        + 0.5 * (det_mixed / (det0.powf(1.0 - beta) * det1.powf(beta))).ln();
    let error_bound = (p0 * p1).sqrt() * (-k).exp();

    Ok(BhattacharyyaBound {
        beta,
        k,
        error_bound,
    })
}

fn positive_determinant(det: f64) -> Result<f64> {
    if det > 0.0 && det.is_finite() {
        Ok(det)
    } else {
        Err(GaussBayesError::SingularCovariance { det })
    }
}
