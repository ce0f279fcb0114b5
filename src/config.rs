//! Classifier configuration via TOML files.
//!
//! Every field is optional in the file; missing values fall back to
//! [`ClassifierConfig::default`].
//!
//! ```toml
//! [classifier]
//! method = "quadratic"
//! priors = [0.3, 0.7]
//! boundary_tolerance = 0.05
//! equality_tolerance = 0.001
//! seed = 42
//! ```

use crate::discriminant::{DiscriminantMethod, DEFAULT_EQUALITY_TOLERANCE};
use crate::error::{GaussBayesError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Half-width of the band `|g(x)| < tolerance` used to collect boundary points.
pub const DEFAULT_BOUNDARY_TOLERANCE: f64 = 0.05;

/// Settings for a classification run.
///
/// # Examples
///
/// ```
/// use gaussbayes::config::ClassifierConfig;
/// use gaussbayes::discriminant::DiscriminantMethod;
///
/// let config = ClassifierConfig::from_toml_str("[classifier]\nmethod = \"linear\"\n")
///     .expect("valid TOML");
/// assert_eq!(config.method, DiscriminantMethod::Linear);
/// assert!((config.boundary_tolerance - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Discriminant to use; `auto` picks from the covariance structure.
    pub method: DiscriminantMethod,
    /// Class priors; uniform when absent.
    pub priors: Option<Vec<f64>>,
    /// Points with `|g(x)|` below this are reported as boundary points.
    pub boundary_tolerance: f64,
    /// Absolute tolerance for treating two covariance matrices as equal.
    pub equality_tolerance: f64,
    /// Seed for synthetic sample generation; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            method: DiscriminantMethod::Auto,
            priors: None,
            boundary_tolerance: DEFAULT_BOUNDARY_TOLERANCE,
            equality_tolerance: DEFAULT_EQUALITY_TOLERANCE,
            seed: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    classifier: ClassifierConfig,
}

impl ClassifierConfig {
    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Config` if it is invalid.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a configuration from TOML text with a `[classifier]` table.
    ///
    /// # Errors
    ///
    /// Returns `Config` on malformed TOML or out-of-range values.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(toml_str).map_err(|e| GaussBayesError::Config(e.to_string()))?;
        file.classifier.validate()?;
        Ok(file.classifier)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `Config` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if !(self.boundary_tolerance >= 0.0 && self.boundary_tolerance.is_finite()) {
            return Err(GaussBayesError::Config(format!(
                "boundary_tolerance must be a finite value >= 0, got {}",
                self.boundary_tolerance
            )));
        }
        if !(self.equality_tolerance >= 0.0 && self.equality_tolerance.is_finite()) {
            return Err(GaussBayesError::Config(format!(
                "equality_tolerance must be a finite value >= 0, got {}",
                self.equality_tolerance
            )));
        }
        if let Some(priors) = &self.priors {
            if let Some(bad) = priors.iter().find(|p| !(**p > 0.0 && p.is_finite())) {
                return Err(GaussBayesError::Config(format!(
                    "priors must be finite values > 0, got {bad}"
                )));
            }
        }
        Ok(())
    }
}
