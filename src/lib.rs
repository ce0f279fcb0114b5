//! Gaussbayes: two-class Bayesian classification over multivariate Gaussian
//! class models.
//!
//! Class models ([`distribution::Distribution`]) hold samples and a mean and
//! covariance, either supplied, loaded from a parameter file, or estimated
//! from the samples. A [`classifier::Classifier`] picks a discriminant
//! (minimum distance, linear, or quadratic) from the relationship between
//! the class covariances, labels every sample or image pixel, and reports
//! misclassifications together with an analytic Bhattacharyya error bound.
//!
//! # Quick Start
//!
//! ```
//! use gaussbayes::prelude::*;
//!
//! let mut ids = IdGenerator::new();
//! let mut a = Distribution::with_parameters(&mut ids, vec![1.0, 1.0], Matrix::eye(2), "a")
//!     .unwrap()
//!     .with_sampler(GaussianSampler::seeded(7));
//! let mut b = Distribution::with_parameters(&mut ids, vec![6.0, 6.0], Matrix::eye(2), "b")
//!     .unwrap()
//!     .with_sampler(GaussianSampler::seeded(8));
//! a.generate_samples(100, None, None).unwrap();
//! b.generate_samples(100, None, None).unwrap();
//!
//! let classifier = Classifier::new(vec![a, b], None).unwrap();
//! let result = classifier.classify_two_classes(DiscriminantMethod::Auto).unwrap();
//! assert!(result.error_rate() < 0.05);
//!
//! let bound = classifier.bhattacharyya_bound().unwrap();
//! assert!(bound.error_bound < 0.01);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Vector and Matrix types with determinant and inverse
//! - [`distribution`]: Class models, ids, and the Gaussian sampler
//! - [`discriminant`]: Method selection and discriminant coefficients
//! - [`classifier`]: Two-class and image classification
//! - [`bound`]: Bhattacharyya error bound
//! - [`io`]: Sample/parameter files and run reports
//! - [`config`]: TOML classifier configuration

pub mod bound;
pub mod classifier;
pub mod config;
pub mod discriminant;
pub mod distribution;
pub mod error;
pub mod io;
pub mod prelude;
pub mod primitives;

pub use error::{GaussBayesError, Result};
pub use primitives::{Matrix, Vector};
