//! Two-class Bayes classification over Gaussian class models.
//!
//! A [`Classifier`] owns its class [`Distribution`]s and their priors. It
//! resolves a discriminant once per run, applies it to every training
//! sample (or pixel), and reports labels, boundary points, and
//! misclassification counts.
//!
//! # Example
//!
//! ```
//! use gaussbayes::classifier::Classifier;
//! use gaussbayes::discriminant::DiscriminantMethod;
//! use gaussbayes::distribution::{Distribution, GaussianSampler, IdGenerator};
//! use gaussbayes::primitives::Matrix;
//!
//! let mut ids = IdGenerator::new();
//! let mut a = Distribution::with_parameters(&mut ids, vec![0.0, 0.0], Matrix::eye(2), "a")
//!     .unwrap()
//!     .with_sampler(GaussianSampler::seeded(1));
//! let mut b = Distribution::with_parameters(&mut ids, vec![5.0, 5.0], Matrix::eye(2), "b")
//!     .unwrap()
//!     .with_sampler(GaussianSampler::seeded(2));
//! a.generate_samples(200, None, None).unwrap();
//! b.generate_samples(200, None, None).unwrap();
//!
//! let classifier = Classifier::new(vec![a, b], None).unwrap();
//! let result = classifier.classify_two_classes(DiscriminantMethod::Auto).unwrap();
//! assert_eq!(result.method, DiscriminantMethod::MinimumDistance);
//! assert!(result.total_misclassified() < 5);
//! ```

mod image;
mod result;

pub use image::{ForegroundMask, PixelSource, RgbImage};
pub use result::{ClassificationResult, ClassifiedPoint, PointDecision};

use crate::bound::{bhattacharyya_bound, BhattacharyyaBound};
use crate::config::{ClassifierConfig, DEFAULT_BOUNDARY_TOLERANCE};
use crate::discriminant::{Discriminant, DiscriminantEngine, DiscriminantMethod};
use crate::distribution::Distribution;
use crate::error::{GaussBayesError, Result};
use crate::primitives::{Matrix, Vector};
use rayon::prelude::*;
use std::collections::HashSet;
use std::f64::consts::PI;
use tracing::{debug, info};

/// Bayes classifier over one or two Gaussian class models.
#[derive(Debug, Clone)]
pub struct Classifier {
    classes: Vec<Distribution>,
    priors: Vec<f64>,
    engine: DiscriminantEngine,
    method: DiscriminantMethod,
    boundary_tolerance: f64,
}

impl Classifier {
    /// Creates a classifier. Priors default to `1 / classes.len()` each.
    ///
    /// # Errors
    ///
    /// - `InvalidClassCount` if `classes` is empty or the prior count
    ///   differs from the class count
    /// - `InvalidArgument` for a non-positive or non-finite prior
    /// - `DimensionMismatch` if the classes disagree on dimensionality
    /// - `InvalidArgument` if two classes share an id (ids label the
    ///   results, so the classes must come from one [`IdGenerator`])
    ///
    /// [`IdGenerator`]: crate::distribution::IdGenerator
    pub fn new(classes: Vec<Distribution>, priors: Option<Vec<f64>>) -> Result<Self> {
        if classes.is_empty() {
            return Err(GaussBayesError::InvalidClassCount {
                expected: "at least 1".to_string(),
                actual: 0,
            });
        }
        let dims = classes[0].dimensions();
        if let Some(other) = classes.iter().find(|c| c.dimensions() != dims) {
            return Err(GaussBayesError::dimension_mismatch(
                "class dimensions",
                dims,
                other.dimensions(),
            ));
        }
        let mut seen = HashSet::with_capacity(classes.len());
        if let Some(dup) = classes.iter().find(|c| !seen.insert(c.id())) {
            return Err(GaussBayesError::invalid_argument(
                "class ids",
                dup.id(),
                "distinct ids from one IdGenerator",
            ));
        }

        let priors = match priors {
            Some(p) => p,
            None => vec![1.0 / classes.len() as f64; classes.len()],
        };
        validate_priors(&priors, classes.len())?;

        Ok(Self {
            classes,
            priors,
            engine: DiscriminantEngine::default(),
            method: DiscriminantMethod::Auto,
            boundary_tolerance: DEFAULT_BOUNDARY_TOLERANCE,
        })
    }

    /// Applies a configuration: method, tolerances, priors (if given), and
    /// per-class sampler seeds (if given; class `i` gets `seed + i`).
    ///
    /// # Errors
    ///
    /// Returns `Config` for invalid values and the errors of
    /// [`Classifier::new`] for mismatched priors.
    pub fn with_config(mut self, config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;
        if let Some(priors) = &config.priors {
            validate_priors(priors, self.classes.len())?;
            self.priors.clone_from(priors);
        }
        if let Some(seed) = config.seed {
            for (i, class) in self.classes.iter_mut().enumerate() {
                class.reseed(seed.wrapping_add(i as u64));
            }
        }
        self.engine = DiscriminantEngine::with_equality_tolerance(config.equality_tolerance);
        self.method = config.method;
        self.boundary_tolerance = config.boundary_tolerance;
        Ok(self)
    }

    /// Class models in index order.
    #[must_use]
    pub fn classes(&self) -> &[Distribution] {
        &self.classes
    }

    /// Mutable access to the class models, e.g. to generate samples.
    pub fn classes_mut(&mut self) -> &mut [Distribution] {
        &mut self.classes
    }

    /// Priors in class order.
    #[must_use]
    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    /// Method used by [`classify_image`](Self::classify_image).
    #[must_use]
    pub fn method(&self) -> DiscriminantMethod {
        self.method
    }

    fn two_classes(&self) -> Result<([&Distribution; 2], [f64; 2])> {
        match (self.classes.as_slice(), self.priors.as_slice()) {
            ([a, b], [pa, pb]) => Ok(([a, b], [*pa, *pb])),
            _ => Err(GaussBayesError::InvalidClassCount {
                expected: "2".to_string(),
                actual: self.classes.len(),
            }),
        }
    }

    /// Derives the discriminant for the two classes, resolving `Auto`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidClassCount` unless there are exactly two classes, and
    /// `SingularCovariance` from the Linear/Quadratic derivations.
    pub fn discriminant(&self, method: DiscriminantMethod) -> Result<Discriminant> {
        let (classes, priors) = self.two_classes()?;
        self.engine.derive(method, classes, priors)
    }

    /// Classifies every sample of both classes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidClassCount` unless there are exactly two classes, and
    /// `SingularCovariance` from the Linear/Quadratic derivations.
    pub fn classify_two_classes(&self, method: DiscriminantMethod) -> Result<ClassificationResult> {
        let (classes, priors) = self.two_classes()?;
        info!(
            first = %classes[0].info(),
            second = %classes[1].info(),
            p0 = priors[0],
            p1 = priors[1],
            "classifying two classes"
        );
        let discriminant = self.engine.derive(method, classes, priors)?;
        debug!(method = %discriminant.method(), "using discriminant");

        let class_ids = [classes[0].id(), classes[1].id()];
        let mut misclassified = [0usize; 2];
        let mut points = Vec::with_capacity(classes[0].sample_count() + classes[1].sample_count());
        let mut boundary_points = Vec::new();

        for (true_idx, class) in classes.iter().enumerate() {
            for sample in class.samples() {
                let (decision, score) = discriminant.decide(sample)?;
                let assigned = class_ids[decision.index()];
                if decision.index() != true_idx {
                    misclassified[true_idx] += 1;
                }
                if score.abs() < self.boundary_tolerance {
                    boundary_points.push(sample.clone());
                }
                points.push(ClassifiedPoint {
                    coordinates: sample.clone(),
                    assigned,
                    actual: class_ids[true_idx],
                    score,
                });
            }
        }

        info!(
            method = %discriminant.method(),
            boundary_points = boundary_points.len(),
            misclassified_first = misclassified[0],
            misclassified_second = misclassified[1],
            total = misclassified[0] + misclassified[1],
            "classification complete"
        );

        Ok(ClassificationResult {
            method: discriminant.method(),
            class_ids,
            class_names: [classes[0].name().to_string(), classes[1].name().to_string()],
            priors,
            points,
            boundary_points,
            misclassified,
        })
    }

    /// Classifies a single feature vector.
    ///
    /// # Errors
    ///
    /// Returns `InvalidClassCount`, `SingularCovariance`, or
    /// `DimensionMismatch` for a wrong-length point.
    pub fn classify_point(&self, x: &[f64], method: DiscriminantMethod) -> Result<PointDecision> {
        let ([first, _], _) = self.two_classes()?;
        first.check_point(x)?;
        let discriminant = self.discriminant(method)?;
        let (decision, score) = discriminant.decide(x)?;
        Ok(PointDecision {
            class: self.classes[decision.index()].id(),
            score,
        })
    }

    /// Labels each pixel foreground or background.
    ///
    /// With two classes a pixel is foreground when `g(x) > threshold` (it
    /// leans toward class 0). With one class it is foreground when the
    /// class's Gaussian density at `x` is at least `threshold`. `features`
    /// maps a pixel color to the feature vector the classes were trained on.
    ///
    /// # Errors
    ///
    /// - `InvalidClassCount` for more than two classes
    /// - `SingularCovariance` if the needed inverse does not exist
    /// - `DimensionMismatch` if `features` yields the wrong length
    pub fn classify_image<P, F>(&self, image: &P, features: F, threshold: f64) -> Result<ForegroundMask>
    where
        P: PixelSource + ?Sized,
        F: Fn([u8; 3]) -> Vec<f64> + Sync,
    {
        let rule = match self.classes.as_slice() {
            [single] => PixelRule::Density(GaussianDensity::new(single)?),
            [_, _] => PixelRule::Discriminant(self.discriminant(self.method)?),
            _ => {
                return Err(GaussBayesError::InvalidClassCount {
                    expected: "1 or 2".to_string(),
                    actual: self.classes.len(),
                })
            }
        };
        info!(
            width = image.width(),
            height = image.height(),
            threshold,
            classes = self.classes.len(),
            "classifying image"
        );

        let width = image.width();
        let rows = (0..image.height())
            .into_par_iter()
            .map(|row| {
                (0..width)
                    .map(|col| rule.is_foreground(&features(image.rgb(row, col)), threshold))
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<Vec<bool>>>>()?;

        let mask = ForegroundMask::from_rows(width, rows);
        debug!(foreground = mask.foreground_count(), "image classified");
        Ok(mask)
    }

    /// Bhattacharyya error bound for the two classes and their priors.
    ///
    /// # Errors
    ///
    /// Returns `InvalidClassCount` unless there are exactly two classes, and
    /// `SingularCovariance` for degenerate covariances.
    pub fn bhattacharyya_bound(&self) -> Result<BhattacharyyaBound> {
        let ([a, b], [pa, pb]) = self.two_classes()?;
        let bound = bhattacharyya_bound(a, b, pa, pb)?;
        info!(k = bound.k, error_bound = bound.error_bound, "bhattacharyya bound");
        Ok(bound)
    }
}

fn validate_priors(priors: &[f64], class_count: usize) -> Result<()> {
    if priors.len() != class_count {
        return Err(GaussBayesError::InvalidClassCount {
            expected: format!("{} (one per prior)", priors.len()),
            actual: class_count,
        });
    }
    if let Some(&bad) = priors.iter().find(|p| !(**p > 0.0 && p.is_finite())) {
        return Err(GaussBayesError::invalid_argument(
            "prior",
            bad,
            "a finite value > 0",
        ));
    }
    Ok(())
}

/// Per-pixel decision rule, resolved once per image.
enum PixelRule {
    Discriminant(Discriminant),
    Density(GaussianDensity),
}

impl PixelRule {
    fn is_foreground(&self, x: &[f64], threshold: f64) -> Result<bool> {
        match self {
            Self::Discriminant(g) => Ok(g.score(x)? > threshold),
            Self::Density(d) => Ok(d.pdf(x)? >= threshold),
        }
    }
}

/// Multivariate normal density of one class.
struct GaussianDensity {
    mean: Vector<f64>,
    precision: Matrix<f64>,
    normalizer: f64,
}

impl GaussianDensity {
    fn new(class: &Distribution) -> Result<Self> {
        let covariance = class.covariance();
        let det = covariance.determinant();
        if !(det > 0.0 && det.is_finite()) {
            return Err(GaussBayesError::SingularCovariance { det });
        }
        let d = class.dimensions() as f64;
        Ok(Self {
            mean: class.mean().clone(),
            precision: covariance.inverse()?,
            normalizer: 1.0 / ((2.0 * PI).powf(d) * det).sqrt(),
        })
    }

    fn pdf(&self, x: &[f64]) -> Result<f64> {
        let diff = self.mean.checked_sub(x)?;
        let mahalanobis = self.precision.quadratic_form(diff.as_slice())?;
        Ok(self.normalizer * (-0.5 * mahalanobis).exp())
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
