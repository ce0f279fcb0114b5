//! Core compute primitives (Vector, Matrix).
//!
//! Dense row-major storage sized for the low-dimensional (2-3) feature
//! spaces the classifier works in.

mod matrix;
mod vector;

pub use matrix::{Matrix, SINGULAR_EPSILON};
pub use vector::Vector;
