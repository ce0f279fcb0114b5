use crate::discriminant::DEFAULT_EQUALITY_TOLERANCE;
use crate::distribution::Distribution;
use crate::error::{GaussBayesError, Result};
use crate::primitives::{Matrix, Vector};
use std::io::{BufRead, Write};

fn parse_error(line: usize, message: impl Into<String>) -> GaussBayesError {
    GaussBayesError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_number(token: &str, line: usize) -> Result<f64> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|e| parse_error(line, format!("invalid number {token:?}: {e}")))
}

fn check_dims(dims: usize) -> Result<()> {
    if dims == 0 {
        return Err(GaussBayesError::invalid_argument(
            "dimensions",
            0,
            "a positive integer",
        ));
    }
    Ok(())
}

/// Reads feature vectors from a sample file.
///
/// The first line is a header and is skipped. The remaining numbers may be
/// split across lines arbitrarily; they are grouped in order into vectors of
/// `dims` values. A trailing group with fewer than `dims` values is dropped.
///
/// # Errors
///
/// - `Parse` (with a 1-based line number) for a token that is not a number
/// - `Io` if reading fails
/// - `InvalidArgument` if `dims` is zero
///
/// # Examples
///
/// ```
/// use gaussbayes::io::read_samples;
///
/// let text = "class a [id: 0]\n1\t2\n3\t4\n5\n";
/// let samples = read_samples(text.as_bytes(), 2).unwrap();
/// assert_eq!(samples, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
/// ```
pub fn read_samples<R: BufRead>(reader: R, dims: usize) -> Result<Vec<Vec<f64>>> {
    check_dims(dims)?;
    let mut samples = Vec::new();
    let mut pending = Vec::with_capacity(dims);

    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        for token in line.split_whitespace() {
            pending.push(parse_number(token, idx + 1)?);
            if pending.len() == dims {
                samples.push(std::mem::replace(&mut pending, Vec::with_capacity(dims)));
            }
        }
    }
    Ok(samples)
}

/// Reads a mean vector and covariance matrix from a parameter file.
///
/// ```text
/// # comment
/// M
/// 1.0
/// 2.0
/// *
/// C
/// 1.0	0.5
/// 0.5	2.0
/// *
/// ```
///
/// `S` is accepted as an alias for `C`. Lines outside a section that do not
/// start a section are ignored. Blank lines inside a section are skipped.
///
/// # Errors
///
/// `Parse` for an unterminated section, a bad number, a mean/covariance
/// whose shape does not match `dims`, or an asymmetric covariance (reported
/// at the covariance header line).
pub fn read_parameters<R: BufRead>(reader: R, dims: usize) -> Result<(Vector<f64>, Matrix<f64>)> {
    check_dims(dims)?;
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;

    let mut mean: Option<Vec<f64>> = None;
    let mut rows: Option<(usize, Vec<Vec<f64>>)> = None;
    let mut i = 0;
    while i < lines.len() {
        let header = lines[i].trim();
        let start = i + 1;
        match header.chars().next() {
            Some('M') => {
                let (body, end) = section_body(&lines, start)?;
                let values = body
                    .iter()
                    .map(|(line_no, text)| parse_number(text, *line_no))
                    .collect::<Result<Vec<f64>>>()?;
                mean = Some(values);
                i = end;
            }
            Some('C' | 'S') => {
                let (body, end) = section_body(&lines, start)?;
                let parsed = body
                    .iter()
                    .map(|(line_no, text)| {
                        text.split_whitespace()
                            .map(|token| parse_number(token, *line_no))
                            .collect::<Result<Vec<f64>>>()
                    })
                    .collect::<Result<Vec<Vec<f64>>>>()?;
                rows = Some((start, parsed));
                i = end;
            }
            _ => {}
        }
        i += 1;
    }

    let mean = mean.ok_or_else(|| parse_error(lines.len(), "missing mean section 'M'"))?;
    let (header_line, rows) =
        rows.ok_or_else(|| parse_error(lines.len(), "missing covariance section 'C'"))?;
    if mean.len() != dims {
        return Err(parse_error(
            lines.len(),
            format!("mean has {} entries, expected {dims}", mean.len()),
        ));
    }
    if rows.len() != dims || rows.iter().any(|r| r.len() != dims) {
        return Err(parse_error(
            lines.len(),
            format!("covariance must be {dims}x{dims}"),
        ));
    }

    let covariance = Matrix::from_rows(&rows)?;
    if !covariance.is_symmetric(DEFAULT_EQUALITY_TOLERANCE) {
        return Err(parse_error(
            header_line,
            format!("covariance is not symmetric within {DEFAULT_EQUALITY_TOLERANCE}"),
        ));
    }

    Ok((Vector::from_vec(mean), covariance))
}

/// Non-blank lines from `start` up to the `*` terminator, with their 1-based
/// line numbers, plus the terminator's index.
fn section_body(lines: &[String], start: usize) -> Result<(Vec<(usize, &str)>, usize)> {
    let mut body = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(start) {
        let text = line.trim();
        if text.starts_with('*') {
            return Ok((body, idx));
        }
        if !text.is_empty() {
            body.push((idx + 1, text));
        }
    }
    Err(parse_error(
        start,
        "section is missing its '*' terminator",
    ))
}

/// Writes a distribution's samples in the sample-file format: a
/// `name [id: n]` header, then one tab-separated line per sample.
///
/// # Errors
///
/// Returns `Io` if writing fails.
pub fn write_samples<W: Write>(distribution: &Distribution, mut writer: W) -> Result<()> {
    writeln!(writer, "{} [id: {}]", distribution.name(), distribution.id())?;
    for sample in distribution.samples() {
        let row: Vec<String> = sample.iter().map(f64::to_string).collect();
        writeln!(writer, "{}", row.join("\t"))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
