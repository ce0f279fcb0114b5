//! Error types for gaussbayes operations.
//!
//! Every failure in the statistical core is surfaced as a distinguishable
//! variant so callers can decide whether to reject an input, fall back to a
//! simpler discriminant, or abort a run.

use thiserror::Error;

/// Main error type for gaussbayes operations.
///
/// # Examples
///
/// ```
/// use gaussbayes::error::GaussBayesError;
///
/// let err = GaussBayesError::DimensionMismatch {
///     expected: "sample=2".to_string(),
///     actual: "3".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Error, Debug)]
pub enum GaussBayesError {
    /// Input vector or matrix length disagrees with the model dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Classification invoked with an unsupported number of classes.
    #[error("invalid class count: expected {expected}, got {actual}")]
    InvalidClassCount {
        /// Required class count description
        expected: String,
        /// Number of classes supplied
        actual: usize,
    },

    /// Covariance matrix is not invertible or has a non-positive determinant.
    #[error("singular covariance matrix: determinant = {det}")]
    SingularCovariance {
        /// Determinant value (close to zero or negative)
        det: f64,
    },

    /// Argument outside its valid range.
    #[error("invalid argument: {param} = {value}, expected {constraint}")]
    InvalidArgument {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Discriminant method code outside the recognized set.
    #[error("unknown discriminant method: {code}")]
    UnknownMethod {
        /// The unrecognized code or name
        code: String,
    },

    /// Malformed line in a sample or parameter file.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GaussBayesError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidArgument {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// True for errors a caller may recover from by retrying with the
    /// minimum-distance discriminant.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::SingularCovariance { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, GaussBayesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = GaussBayesError::dimension_mismatch("sample", 2, 3);
        let msg = err.to_string();
        assert!(msg.contains("dimension mismatch"));
        assert!(msg.contains("sample=2"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_singular_covariance_display() {
        let err = GaussBayesError::SingularCovariance { det: 0.0 };
        assert!(err.to_string().contains("singular covariance"));
        assert!(err.is_singular());
    }

    #[test]
    fn test_invalid_class_count_display() {
        let err = GaussBayesError::InvalidClassCount {
            expected: "2".to_string(),
            actual: 3,
        };
        assert!(err.to_string().contains("invalid class count"));
        assert!(!err.is_singular());
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = GaussBayesError::invalid_argument("new_size", 10, "<= 4");
        let msg = err.to_string();
        assert!(msg.contains("new_size"));
        assert!(msg.contains("10"));
        assert!(msg.contains("<= 4"));
    }

    #[test]
    fn test_unknown_method_display() {
        let err = GaussBayesError::UnknownMethod {
            code: "7".to_string(),
        };
        assert!(err.to_string().contains("unknown discriminant method: 7"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GaussBayesError = io_err.into();
        assert!(matches!(err, GaussBayesError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
