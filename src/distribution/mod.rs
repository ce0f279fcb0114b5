//! Class models: a sample set plus the Gaussian parameters describing it.
//!
//! A [`Distribution`] is created in one of three ways:
//!
//! - from known parameters ([`Distribution::with_parameters`]), typically to
//!   generate synthetic samples,
//! - empty ([`Distribution::empty`]), with samples appended later and the
//!   parameters estimated from them,
//! - from a parameter file ([`Distribution::from_parameter_file`]).
//!
//! # Covariance diagonal convention
//!
//! [`Distribution::estimate_parameters_from_samples`] stores the *standard
//! deviation* on the diagonal of the covariance matrix and the raw
//! covariance off the diagonal. [`Distribution::generate_samples`] reads the
//! diagonal entry as the per-axis spread, so an estimate and a regenerated
//! sample set agree with each other. Callers feeding these matrices to
//! code that expects variances on the diagonal must square the diagonal
//! themselves.
//!
//! # Example
//!
//! ```
//! use gaussbayes::distribution::{Distribution, GaussianSampler, IdGenerator};
//! use gaussbayes::primitives::Matrix;
//!
//! let mut ids = IdGenerator::new();
//! let mut d = Distribution::with_parameters(
//!     &mut ids,
//!     vec![1.0, 2.0],
//!     Matrix::eye(2),
//!     "class a",
//! )
//! .expect("2-D parameters")
//! .with_sampler(GaussianSampler::seeded(3));
//!
//! d.generate_samples(100, None, None).expect("valid overrides");
//! assert_eq!(d.sample_count(), 100);
//! ```

mod id;
mod sampler;

pub use id::{DistributionId, IdGenerator};
pub use sampler::GaussianSampler;

use crate::discriminant::DEFAULT_EQUALITY_TOLERANCE;
use crate::error::{GaussBayesError, Result};
use crate::io;
use crate::primitives::{Matrix, Vector};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Where the current mean and covariance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSource {
    /// No parameters yet (zero mean, zero covariance).
    Unset,
    /// Supplied by the caller or loaded from a parameter file.
    Supplied,
    /// Derived from the sample set.
    Estimated,
}

/// One class: identity, Gaussian parameters, and samples.
///
/// Cloning copies the sampler state too, so a clone draws the same samples
/// as its original until one of them is [reseeded](Self::reseed). The clone
/// keeps the original's id.
#[derive(Debug, Clone)]
pub struct Distribution {
    id: DistributionId,
    name: String,
    dimensions: usize,
    mean: Vector<f64>,
    covariance: Matrix<f64>,
    samples: Vec<Vec<f64>>,
    source: ParameterSource,
    sampler: GaussianSampler,
}

impl Distribution {
    /// General constructor: a fixed dimensionality with an optional mean
    /// and covariance. Parameters left out stay zero; supplying either one
    /// marks the parameters as [`ParameterSource::Supplied`].
    ///
    /// An empty `name` defaults to the id.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if a supplied mean or covariance does not
    /// match `dimensions`, and `InvalidArgument` if `dimensions` is zero or
    /// the covariance is not symmetric (element-wise within
    /// [`DEFAULT_EQUALITY_TOLERANCE`]).
    pub fn new(
        ids: &mut IdGenerator,
        dimensions: usize,
        mean: Option<Vec<f64>>,
        covariance: Option<Matrix<f64>>,
        name: &str,
    ) -> Result<Self> {
        check_dimensions(dimensions)?;
        if let Some(m) = &mean {
            if m.len() != dimensions {
                return Err(GaussBayesError::dimension_mismatch(
                    "mean",
                    dimensions,
                    m.len(),
                ));
            }
        }
        if let Some(c) = &covariance {
            check_covariance(dimensions, c)?;
        }

        let mut distribution = Self::unset(ids, dimensions, name);
        if mean.is_some() || covariance.is_some() {
            distribution.source = ParameterSource::Supplied;
        }
        if let Some(m) = mean {
            distribution.mean = Vector::from_vec(m);
        }
        if let Some(c) = covariance {
            distribution.covariance = c;
        }
        Ok(distribution)
    }

    /// Creates a distribution from a known mean and covariance.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the covariance is not
    /// `mean.len() × mean.len()`, and `InvalidArgument` for an empty mean or
    /// an asymmetric covariance.
    pub fn with_parameters(
        ids: &mut IdGenerator,
        mean: Vec<f64>,
        covariance: Matrix<f64>,
        name: &str,
    ) -> Result<Self> {
        let dimensions = mean.len();
        Self::new(ids, dimensions, Some(mean), Some(covariance), name)
    }

    /// Creates an empty distribution; samples are added later.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `dimensions` is zero.
    pub fn empty(ids: &mut IdGenerator, dimensions: usize, name: &str) -> Result<Self> {
        check_dimensions(dimensions)?;
        Ok(Self::unset(ids, dimensions, name))
    }

    /// Creates a distribution from a parameter file (see
    /// [`io::read_parameters`] for the layout).
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened and `Parse` if it is
    /// malformed or holds an asymmetric covariance.
    pub fn from_parameter_file(
        ids: &mut IdGenerator,
        dimensions: usize,
        path: impl AsRef<Path>,
        name: &str,
    ) -> Result<Self> {
        check_dimensions(dimensions)?;
        let reader = BufReader::new(File::open(path.as_ref())?);
        let (mean, covariance) = io::read_parameters(reader, dimensions)?;
        debug!(path = %path.as_ref().display(), dimensions, "loaded distribution parameters");
        Self::with_parameters(ids, mean.into_vec(), covariance, name)
    }

    fn unset(ids: &mut IdGenerator, dimensions: usize, name: &str) -> Self {
        let id = ids.next_id();
        let name = if name.is_empty() {
            id.to_string()
        } else {
            name.to_string()
        };
        Self {
            id,
            name,
            dimensions,
            mean: Vector::zeros(dimensions),
            covariance: Matrix::zeros(dimensions, dimensions),
            samples: Vec::new(),
            source: ParameterSource::Unset,
            sampler: GaussianSampler::from_entropy(),
        }
    }

    /// Replaces the sampler, e.g. with a seeded one. Use this (or
    /// [`reseed`](Self::reseed)) after cloning when the copies should
    /// produce independent samples.
    #[must_use]
    pub fn with_sampler(mut self, sampler: GaussianSampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Reseeds the sampler and clears its cached variate.
    pub fn reseed(&mut self, seed: u64) {
        self.sampler = GaussianSampler::seeded(seed);
    }

    /// Unique id, used as the class label.
    #[must_use]
    pub fn id(&self) -> DistributionId {
        self.id
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `"name" [id: n]`
    #[must_use]
    pub fn info(&self) -> String {
        format!("\"{}\" [id: {}]", self.name, self.id)
    }

    /// Number of features per sample.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Mean vector.
    #[must_use]
    pub fn mean(&self) -> &Vector<f64> {
        &self.mean
    }

    /// Covariance matrix (see the module docs for the diagonal convention).
    #[must_use]
    pub fn covariance(&self) -> &Matrix<f64> {
        &self.covariance
    }

    /// Samples in insertion order.
    #[must_use]
    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    /// Number of samples held.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Where the current parameters came from.
    #[must_use]
    pub fn parameter_source(&self) -> ParameterSource {
        self.source
    }

    /// Appends one sample.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `sample.len() != dimensions`.
    pub fn add_sample(&mut self, sample: Vec<f64>) -> Result<()> {
        if sample.len() != self.dimensions {
            return Err(GaussBayesError::dimension_mismatch(
                "sample",
                self.dimensions,
                sample.len(),
            ));
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Appends samples read from a sample file (see [`io::read_samples`]).
    ///
    /// Returns the number of samples added.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Parse` on unreadable input.
    pub fn import_samples(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let imported = io::read_samples(reader, self.dimensions)?;
        let count = imported.len();
        self.samples.extend(imported);
        debug!(
            distribution = %self.info(),
            path = %path.as_ref().display(),
            count,
            "imported samples"
        );
        Ok(count)
    }

    /// Generates `count` synthetic samples and appends them.
    ///
    /// Each dimension is drawn independently from a normal with the
    /// dimension's mean and the covariance diagonal entry as its spread.
    /// Off-diagonal covariance is ignored during generation.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if an override has the wrong shape and
    /// `InvalidArgument` if the covariance override is not symmetric.
    pub fn generate_samples(
        &mut self,
        count: usize,
        mean_override: Option<&[f64]>,
        covariance_override: Option<&Matrix<f64>>,
    ) -> Result<()> {
        let mean = match mean_override {
            Some(m) if m.len() != self.dimensions => {
                return Err(GaussBayesError::dimension_mismatch(
                    "mean override",
                    self.dimensions,
                    m.len(),
                ))
            }
            Some(m) => m.to_vec(),
            None => self.mean.as_slice().to_vec(),
        };
        let spread = match covariance_override {
            Some(c) => {
                check_covariance(self.dimensions, c)?;
                c.diagonal().into_vec()
            }
            None => self.covariance.diagonal().into_vec(),
        };

        info!(distribution = %self.info(), count, "generating samples");
        self.samples.reserve(count);
        for _ in 0..count {
            let sample: Vec<f64> = mean
                .iter()
                .zip(&spread)
                .map(|(&m, &s)| self.sampler.sample(m, s))
                .collect();
            self.samples.push(sample);
        }
        Ok(())
    }

    /// Derives the mean and covariance from the current samples.
    ///
    /// The diagonal holds the standard deviation of each dimension; off the
    /// diagonal is the population covariance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if there are no samples.
    pub fn estimate_parameters_from_samples(&mut self) -> Result<()> {
        let n = self.samples.len();
        if n == 0 {
            return Err(GaussBayesError::invalid_argument(
                "samples",
                0,
                "at least one sample",
            ));
        }
        let n_f = n as f64;
        let dims = self.dimensions;

        let mut mean = vec![0.0; dims];
        for sample in &self.samples {
            for (acc, &x) in mean.iter_mut().zip(sample) {
                *acc += x;
            }
        }
        for m in &mut mean {
            *m /= n_f;
        }

        let mut covariance = Matrix::zeros(dims, dims);
        for i in 0..dims {
            for j in 0..=i {
                let sum: f64 = self
                    .samples
                    .iter()
                    .map(|s| (s[i] - mean[i]) * (s[j] - mean[j]))
                    .sum();
                let value = if i == j {
                    (sum / n_f).sqrt()
                } else {
                    sum / n_f
                };
                covariance.set(i, j, value);
                covariance.set(j, i, value);
            }
        }

        if self.source == ParameterSource::Supplied {
            debug!(distribution = %self.info(), "replacing supplied parameters with estimates");
        }
        self.mean = Vector::from_vec(mean);
        self.covariance = covariance;
        self.source = ParameterSource::Estimated;
        Ok(())
    }

    /// Keeps only the first `new_size` samples.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `new_size` exceeds the sample count.
    pub fn truncate_samples(&mut self, new_size: usize) -> Result<()> {
        if new_size > self.samples.len() {
            return Err(GaussBayesError::invalid_argument(
                "new_size",
                new_size,
                &format!("<= {} (current sample count)", self.samples.len()),
            ));
        }
        self.samples.truncate(new_size);
        Ok(())
    }

    /// Checks that `point` matches this distribution's dimensionality.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` otherwise.
    pub fn check_point(&self, point: &[f64]) -> Result<()> {
        if point.len() == self.dimensions {
            Ok(())
        } else {
            Err(GaussBayesError::dimension_mismatch(
                "point",
                self.dimensions,
                point.len(),
            ))
        }
    }
}

fn check_dimensions(dimensions: usize) -> Result<()> {
    if dimensions == 0 {
        return Err(GaussBayesError::invalid_argument(
            "dimensions",
            0,
            "a positive integer",
        ));
    }
    Ok(())
}

fn check_covariance(dimensions: usize, covariance: &Matrix<f64>) -> Result<()> {
    if covariance.shape() != (dimensions, dimensions) {
        return Err(GaussBayesError::DimensionMismatch {
            expected: format!("{dimensions}x{dimensions} covariance"),
            actual: format!("{}x{}", covariance.n_rows(), covariance.n_cols()),
        });
    }
    if !covariance.is_symmetric(DEFAULT_EQUALITY_TOLERANCE) {
        return Err(GaussBayesError::invalid_argument(
            "covariance",
            "asymmetric matrix",
            &format!("symmetric within {DEFAULT_EQUALITY_TOLERANCE}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "distribution_tests.rs"]
mod tests;
