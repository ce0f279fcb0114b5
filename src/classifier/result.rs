//! Outcome types for classification runs.

use crate::discriminant::DiscriminantMethod;
use crate::distribution::DistributionId;
use crate::error::{GaussBayesError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label and score for a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDecision {
    /// Assigned class.
    pub class: DistributionId,
    /// `g(x) = g_0(x) - g_1(x)`.
    pub score: f64,
}

/// One classified training sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPoint {
    /// Feature vector.
    pub coordinates: Vec<f64>,
    /// Class chosen by the discriminant.
    pub assigned: DistributionId,
    /// Class the sample was drawn from.
    pub actual: DistributionId,
    /// Discriminant score.
    pub score: f64,
}

impl ClassifiedPoint {
    /// True when the assigned class differs from the ground truth.
    #[must_use]
    pub fn is_misclassified(&self) -> bool {
        self.assigned != self.actual
    }
}

/// Everything a two-class run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The concrete discriminant that was applied.
    pub method: DiscriminantMethod,
    /// Ids of class 0 and class 1.
    pub class_ids: [DistributionId; 2],
    /// Names of class 0 and class 1.
    pub class_names: [String; 2],
    /// Priors used for the run.
    pub priors: [f64; 2],
    /// Every sample of both classes, in class then insertion order.
    pub points: Vec<ClassifiedPoint>,
    /// Samples lying near the decision boundary.
    pub boundary_points: Vec<Vec<f64>>,
    /// Misclassification count per true class (indexed like `class_ids`).
    pub misclassified: [usize; 2],
}

impl ClassificationResult {
    /// Sum of both misclassification counters.
    #[must_use]
    pub fn total_misclassified(&self) -> usize {
        self.misclassified.iter().sum()
    }

    /// Number of boundary points.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.boundary_points.len()
    }

    /// Fraction of points whose label differs from the ground truth.
    #[must_use]
    pub fn error_rate(&self) -> f64 {
        if self.points.is_empty() {
            0.0
        } else {
            self.total_misclassified() as f64 / self.points.len() as f64
        }
    }

    /// Counts keyed by `(true class, assigned class)`, including the
    /// correctly classified diagonal.
    #[must_use]
    pub fn misclassification_counts(&self) -> BTreeMap<(DistributionId, DistributionId), usize> {
        let mut counts = BTreeMap::new();
        for point in &self.points {
            *counts.entry((point.actual, point.assigned)).or_insert(0) += 1;
        }
        counts
    }

    /// Serializes the result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the result cannot be encoded.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GaussBayesError::Serialization(e.to_string()))
    }
}
