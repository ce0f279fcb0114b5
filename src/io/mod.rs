//! Line-oriented text formats.
//!
//! Inputs:
//!
//! - sample files: a header line, then whitespace-separated numbers grouped
//!   into vectors of the distribution's dimensionality
//!   ([`read_samples`], [`write_samples`])
//! - parameter files: `M` and `C`/`S` sections terminated by `*`
//!   ([`read_parameters`])
//!
//! Outputs of a classification run: a tab-separated report, the boundary
//! points, and a misclassification summary ([`write_run_artifacts`]).

mod import;
mod report;

pub use import::{read_parameters, read_samples, write_samples};
pub use report::{
    write_boundary_points, write_classification_report, write_run_artifacts, write_summary,
    RunArtifacts,
};
