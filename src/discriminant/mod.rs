//! Two-class Bayes discriminant functions.
//!
//! Three decision rules are supported, each Bayes-optimal for a particular
//! relationship between the class covariances:
//!
//! ```text
//! MinimumDistance  g_i(x) = -||x - μ_i||² + ln P_i
//! Linear           g_i(x) = w_iᵗ x + w0_i
//!                  w_i  = Σ_i⁻¹ μ_i
//!                  w0_i = -½ μ_iᵗ Σ_i⁻¹ μ_i + ln P_i
//! Quadratic        g_i(x) = xᵗ W_i x + w_iᵗ x + w0_i
//!                  W_i  = -½ Σ_i⁻¹
//!                  w0_i = -½ μ_iᵗ Σ_i⁻¹ μ_i - ½ ln|Σ_i| + ln P_i
//! ```
//!
//! The combined score is `g(x) = g_0(x) - g_1(x)`; class 0 wins only when
//! `g(x) > 0`, so ties go to class 1.
//!
//! # Example
//!
//! ```
//! use gaussbayes::discriminant::{Decision, DiscriminantEngine, DiscriminantMethod};
//! use gaussbayes::distribution::{Distribution, IdGenerator};
//! use gaussbayes::primitives::Matrix;
//!
//! let mut ids = IdGenerator::new();
//! let a = Distribution::with_parameters(&mut ids, vec![0.0, 0.0], Matrix::eye(2), "a").unwrap();
//! let b = Distribution::with_parameters(&mut ids, vec![4.0, 4.0], Matrix::eye(2), "b").unwrap();
//!
//! let engine = DiscriminantEngine::default();
//! let g = engine.derive(DiscriminantMethod::Auto, [&a, &b], [0.5, 0.5]).unwrap();
//! assert_eq!(g.method(), DiscriminantMethod::MinimumDistance);
//! assert_eq!(Decision::from_score(g.score(&[0.5, 0.5]).unwrap()), Decision::First);
//! ```

mod method;

pub use method::DiscriminantMethod;

use crate::distribution::Distribution;
use crate::error::{GaussBayesError, Result};
use crate::primitives::{Matrix, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Absolute tolerance used when comparing the two covariance matrices.
pub const DEFAULT_EQUALITY_TOLERANCE: f64 = 0.001;

/// Which of the two classes a score selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Class 0 (`g(x) > 0`).
    First,
    /// Class 1 (`g(x) <= 0`).
    Second,
}

impl Decision {
    /// Applies the two-class decision rule.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Self::First
        } else {
            Self::Second
        }
    }

    /// Index of the selected class (0 or 1).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Linear discriminant coefficients for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearTerms {
    /// Weight vector `Σ⁻¹μ`.
    pub w: Vector<f64>,
    /// Bias `-½ μᵗΣ⁻¹μ + ln P`.
    pub w0: f64,
}

/// Quadratic discriminant coefficients for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticTerms {
    /// Weight matrix `-½ Σ⁻¹`.
    pub big_w: Matrix<f64>,
    /// Weight vector `Σ⁻¹μ`.
    pub w: Vector<f64>,
    /// Bias `-½ μᵗΣ⁻¹μ - ½ ln|Σ| + ln P`.
    pub w0: f64,
}

/// A resolved discriminant with its coefficients for both classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Discriminant {
    /// Euclidean distance to the means plus the log prior.
    MinimumDistance {
        /// Class means.
        means: [Vector<f64>; 2],
        /// `ln P_i`.
        log_priors: [f64; 2],
    },
    /// Shared-covariance linear rule.
    Linear([LinearTerms; 2]),
    /// General quadratic rule.
    Quadratic([QuadraticTerms; 2]),
}

impl Discriminant {
    /// The concrete method these coefficients implement.
    #[must_use]
    pub fn method(&self) -> DiscriminantMethod {
        match self {
            Self::MinimumDistance { .. } => DiscriminantMethod::MinimumDistance,
            Self::Linear(_) => DiscriminantMethod::Linear,
            Self::Quadratic(_) => DiscriminantMethod::Quadratic,
        }
    }

    /// Dimensionality the coefficients expect.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        match self {
            Self::MinimumDistance { means, .. } => means[0].len(),
            Self::Linear(terms) => terms[0].w.len(),
            Self::Quadratic(terms) => terms[0].w.len(),
        }
    }

    /// Evaluates `g_class(x)`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` has the wrong length, and
    /// `InvalidArgument` if `class > 1`.
    pub fn class_score(&self, class: usize, x: &[f64]) -> Result<f64> {
        if class > 1 {
            return Err(GaussBayesError::invalid_argument("class", class, "0 or 1"));
        }
        if x.len() != self.dimensions() {
            return Err(GaussBayesError::dimension_mismatch(
                "point",
                self.dimensions(),
                x.len(),
            ));
        }
        match self {
            Self::MinimumDistance { means, log_priors } => {
                let diff = means[class].checked_sub(x)?;
                Ok(-diff.norm_squared() + log_priors[class])
            }
            Self::Linear(terms) => {
                let t = &terms[class];
                Ok(t.w.dot_slice(x)? + t.w0)
            }
            Self::Quadratic(terms) => {
                let t = &terms[class];
                Ok(t.big_w.quadratic_form(x)? + t.w.dot_slice(x)? + t.w0)
            }
        }
    }

    /// Evaluates `g(x) = g_0(x) - g_1(x)`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` has the wrong length.
    pub fn score(&self, x: &[f64]) -> Result<f64> {
        Ok(self.class_score(0, x)? - self.class_score(1, x)?)
    }

    /// Scores `x` and applies the decision rule.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` has the wrong length.
    pub fn decide(&self, x: &[f64]) -> Result<(Decision, f64)> {
        let score = self.score(x)?;
        Ok((Decision::from_score(score), score))
    }
}

/// Selects and derives discriminants from a pair of distributions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscriminantEngine {
    equality_tolerance: f64,
}

impl Default for DiscriminantEngine {
    fn default() -> Self {
        Self {
            equality_tolerance: DEFAULT_EQUALITY_TOLERANCE,
        }
    }
}

impl DiscriminantEngine {
    /// Engine with a custom covariance-equality tolerance.
    #[must_use]
    pub fn with_equality_tolerance(equality_tolerance: f64) -> Self {
        Self { equality_tolerance }
    }

    /// Tolerance used by [`select_method`](Self::select_method).
    #[must_use]
    pub fn equality_tolerance(&self) -> f64 {
        self.equality_tolerance
    }

    /// Auto-selection rule.
    ///
    /// Equal covariances (within tolerance) give `Linear`, or
    /// `MinimumDistance` when the shared covariance is a scaled identity.
    /// Anything else gives `Quadratic`.
    #[must_use]
    pub fn select_method(&self, first: &Distribution, second: &Distribution) -> DiscriminantMethod {
        let (c0, c1) = (first.covariance(), second.covariance());
        if c0.approx_eq(c1, self.equality_tolerance) {
            if c0.is_scaled_identity(self.equality_tolerance) {
                DiscriminantMethod::MinimumDistance
            } else {
                DiscriminantMethod::Linear
            }
        } else {
            DiscriminantMethod::Quadratic
        }
    }

    /// Resolves `Auto` (if requested) and derives the coefficients.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the two distributions disagree on dimensionality
    /// - `SingularCovariance` if a covariance cannot be inverted (Linear and
    ///   Quadratic) or has a non-positive determinant (Quadratic)
    /// - `InvalidArgument` for a non-positive prior
    pub fn derive(
        &self,
        method: DiscriminantMethod,
        classes: [&Distribution; 2],
        priors: [f64; 2],
    ) -> Result<Discriminant> {
        let [first, second] = classes;
        if first.dimensions() != second.dimensions() {
            return Err(GaussBayesError::dimension_mismatch(
                "class dimensions",
                first.dimensions(),
                second.dimensions(),
            ));
        }
        for prior in priors {
            if !(prior > 0.0 && prior.is_finite()) {
                return Err(GaussBayesError::invalid_argument(
                    "prior",
                    prior,
                    "a finite value > 0",
                ));
            }
        }

        let resolved = if method.is_concrete() {
            method
        } else {
            let selected = self.select_method(first, second);
            debug!(method = %selected, "auto-selected discriminant");
            selected
        };

        match resolved {
            DiscriminantMethod::MinimumDistance | DiscriminantMethod::Auto => {
                Ok(Discriminant::MinimumDistance {
                    means: [first.mean().clone(), second.mean().clone()],
                    log_priors: [priors[0].ln(), priors[1].ln()],
                })
            }
            DiscriminantMethod::Linear => Ok(Discriminant::Linear([
                linear_terms(first, priors[0])?,
                linear_terms(second, priors[1])?,
            ])),
            DiscriminantMethod::Quadratic => Ok(Discriminant::Quadratic([
                quadratic_terms(first, priors[0])?,
                quadratic_terms(second, priors[1])?,
            ])),
        }
    }
}

fn linear_terms(class: &Distribution, prior: f64) -> Result<LinearTerms> {
    let inv = class.covariance().inverse()?;
    let w = inv.matvec(class.mean().as_slice())?;
    let w0 = -0.5 * w.dot(class.mean()) + prior.ln();
    Ok(LinearTerms { w, w0 })
}

fn quadratic_terms(class: &Distribution, prior: f64) -> Result<QuadraticTerms> {
    let det = class.covariance().determinant();
    if !(det > 0.0 && det.is_finite()) {
        return Err(GaussBayesError::SingularCovariance { det });
    }
    let inv = class.covariance().inverse()?;
    let w = inv.matvec(class.mean().as_slice())?;
    let w0 = -0.5 * w.dot(class.mean()) - 0.5 * det.ln() + prior.ln();
    Ok(QuadraticTerms {
        big_w: inv.mul_scalar(-0.5),
        w,
        w0,
    })
}

#[cfg(test)]
#[path = "discriminant_tests.rs"]
mod tests;
