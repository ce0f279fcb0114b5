use crate::classifier::ClassificationResult;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Paths written by [`write_run_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifacts {
    /// Per-point report.
    pub report: PathBuf,
    /// Boundary points.
    pub boundary: PathBuf,
    /// Misclassification summary.
    pub summary: PathBuf,
    /// Full result as JSON.
    pub json: PathBuf,
}

fn coordinate_name(axis: usize) -> String {
    match axis {
        0 => "x".to_string(),
        1 => "y".to_string(),
        2 => "z".to_string(),
        n => format!("x{n}"),
    }
}

fn join_row(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join("\t")
}

/// Writes one line per classified point.
///
/// Columns are the coordinates (`x`, `y`, then `z` for 3-D data) followed
/// by `assigned_class` and `true_class`, both as distribution ids.
///
/// # Errors
///
/// Returns `Io` if writing fails.
pub fn write_classification_report<W: Write>(result: &ClassificationResult, mut writer: W) -> Result<()> {
    let dims = result.points.first().map_or(2, |p| p.coordinates.len());
    let mut header: Vec<String> = (0..dims).map(coordinate_name).collect();
    header.push("assigned_class".to_string());
    header.push("true_class".to_string());
    writeln!(writer, "{}", header.join("\t"))?;

    for point in &result.points {
        writeln!(
            writer,
            "{}\t{}\t{}",
            join_row(&point.coordinates),
            point.assigned,
            point.actual
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the boundary points, one tab-separated point per line.
///
/// # Errors
///
/// Returns `Io` if writing fails.
pub fn write_boundary_points<W: Write>(result: &ClassificationResult, mut writer: W) -> Result<()> {
    for point in &result.boundary_points {
        writeln!(writer, "{}", join_row(point))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a human-readable summary of the run.
///
/// # Errors
///
/// Returns `Io` if writing fails.
pub fn write_summary<W: Write>(result: &ClassificationResult, mut writer: W) -> Result<()> {
    let [first, second] = result.class_ids;
    writeln!(
        writer,
        "classes: \"{}\" [id: {first}] vs \"{}\" [id: {second}]",
        result.class_names[0], result.class_names[1]
    )?;
    writeln!(
        writer,
        "priors: P(w{first}) = {}, P(w{second}) = {}",
        result.priors[0], result.priors[1]
    )?;
    writeln!(writer, "method: {}", result.method)?;
    writeln!(writer, "points: {}", result.points.len())?;
    writeln!(writer, "points on boundary: {}", result.boundary_count())?;
    writeln!(
        writer,
        "misclassified ({first} as {second}): {}",
        result.misclassified[0]
    )?;
    writeln!(
        writer,
        "misclassified ({second} as {first}): {}",
        result.misclassified[1]
    )?;
    writeln!(writer, "total misclassified: {}", result.total_misclassified())?;
    writeln!(writer, "error rate: {:.6}", result.error_rate())?;
    writer.flush()?;
    Ok(())
}

/// Writes the report, boundary points, summary, and JSON of one run into
/// `dir`, named `<stem>_report.tsv`, `<stem>_boundary.tsv`,
/// `<stem>_summary.txt`, and `<stem>.json`.
///
/// Every artifact is first written to a hidden temporary sibling and only
/// renamed into place once all of them are complete. A failed run leaves
/// no partial files and never touches files belonging to other stems. If a
/// rename fails part way, every artifact of this stem is removed, so the
/// directory never holds a mix of this run's files and older ones.
///
/// # Errors
///
/// Returns `Io` if a file cannot be written or renamed, and
/// `Serialization` if the JSON encoding fails.
pub fn write_run_artifacts(dir: impl AsRef<Path>, stem: &str, result: &ClassificationResult) -> Result<RunArtifacts> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let artifacts = RunArtifacts {
        report: dir.join(format!("{stem}_report.tsv")),
        boundary: dir.join(format!("{stem}_boundary.tsv")),
        summary: dir.join(format!("{stem}_summary.txt")),
        json: dir.join(format!("{stem}.json")),
    };
    let targets = [
        &artifacts.report,
        &artifacts.boundary,
        &artifacts.summary,
        &artifacts.json,
    ];
    let staged: Vec<PathBuf> = targets.iter().map(|t| staging_path(t)).collect();

    let written = stage_all(&staged, result);
    if let Err(e) = written {
        warn!(stem, error = %e, "discarding partial run artifacts");
        discard(&staged);
        return Err(e);
    }
    for (tmp, target) in staged.iter().zip(targets) {
        if let Err(e) = fs::rename(tmp, target) {
            warn!(
                stem,
                target = %target.display(),
                error = %e,
                "rename failed, removing run artifacts"
            );
            discard(&staged);
            discard(&targets);
            return Err(e.into());
        }
    }

    info!(dir = %dir.display(), stem, "run artifacts written");
    Ok(artifacts)
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.tmp"))
}

fn stage_all(staged: &[PathBuf], result: &ClassificationResult) -> Result<()> {
    write_classification_report(result, BufWriter::new(File::create(&staged[0])?))?;
    write_boundary_points(result, BufWriter::new(File::create(&staged[1])?))?;
    write_summary(result, BufWriter::new(File::create(&staged[2])?))?;
    let json = result.to_json()?;
    let mut writer = BufWriter::new(File::create(&staged[3])?);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn discard<P: AsRef<Path>>(paths: &[P]) {
    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
