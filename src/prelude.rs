//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use gaussbayes::prelude::*;
//! ```

pub use crate::bound::{bhattacharyya_bound, BhattacharyyaBound};
pub use crate::classifier::{ClassificationResult, Classifier, PixelSource, RgbImage};
pub use crate::config::ClassifierConfig;
pub use crate::discriminant::{Decision, DiscriminantEngine, DiscriminantMethod};
pub use crate::distribution::{Distribution, DistributionId, GaussianSampler, IdGenerator};
pub use crate::error::{GaussBayesError, Result};
pub use crate::primitives::{Matrix, Vector};
