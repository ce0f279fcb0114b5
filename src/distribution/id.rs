//! Explicit identifier source for distributions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a [`Distribution`](super::Distribution), also used as its
/// class label during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DistributionId(pub usize);

impl fmt::Display for DistributionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id counter handed to distribution constructors.
///
/// Owning the counter keeps id assignment deterministic per caller; two
/// generators never influence each other.
///
/// # Examples
///
/// ```
/// use gaussbayes::distribution::{DistributionId, IdGenerator};
///
/// let mut ids = IdGenerator::new();
/// assert_eq!(ids.next_id(), DistributionId(0));
/// assert_eq!(ids.next_id(), DistributionId(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: usize,
}

impl IdGenerator {
    /// Starts counting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next id.
    pub fn next_id(&mut self) -> DistributionId {
        let id = DistributionId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will hand out.
    #[must_use]
    pub fn peek(&self) -> DistributionId {
        DistributionId(self.next)
    }
}
