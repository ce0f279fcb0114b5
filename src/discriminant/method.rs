//! Discriminant selection tag.

use crate::error::{GaussBayesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which discriminant to use. `Auto` is resolved once per run into one of
/// the three concrete variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscriminantMethod {
    /// Pick from the covariance structure of the two classes.
    #[default]
    Auto,
    /// Equal, isotropic covariances.
    MinimumDistance,
    /// Equal, general covariances.
    Linear,
    /// Unequal covariances.
    Quadratic,
}

impl DiscriminantMethod {
    /// Parses the numeric method code: 0 auto, 1 minimum distance,
    /// 2 linear, 3 quadratic.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMethod` for any other code.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Auto),
            1 => Ok(Self::MinimumDistance),
            2 => Ok(Self::Linear),
            3 => Ok(Self::Quadratic),
            other => Err(GaussBayesError::UnknownMethod {
                code: other.to_string(),
            }),
        }
    }

    /// Numeric code of this method.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Auto => 0,
            Self::MinimumDistance => 1,
            Self::Linear => 2,
            Self::Quadratic => 3,
        }
    }

    /// True for every variant except `Auto`.
    #[must_use]
    pub fn is_concrete(self) -> bool {
        self != Self::Auto
    }
}

impl fmt::Display for DiscriminantMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::MinimumDistance => "minimum_distance",
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
        };
        f.write_str(name)
    }
}

impl FromStr for DiscriminantMethod {
    type Err = GaussBayesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "minimum_distance" | "min_distance" | "minimum-distance" => Ok(Self::MinimumDistance),
            "linear" => Ok(Self::Linear),
            "quadratic" => Ok(Self::Quadratic),
            other => match other.parse::<i32>() {
                Ok(code) => Self::from_code(code),
                Err(_) => Err(GaussBayesError::UnknownMethod {
                    code: s.to_string(),
                }),
            },
        }
    }
}
