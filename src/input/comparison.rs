use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::input::reader::csv_reader;
use crate::input::{InputError, find_csv};
use crate::model::{Rgb, Source};

pub const MEAN_ERROR_COLUMN: &str = "meanError";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Only `compare-<reference>-<other>.csv` is accepted.
    Strict,
    /// Falls back to `compare-<other>-<reference>.csv`.
    ReversedFallback,
}

#[derive(Debug, Clone)]
pub struct ComparisonRecord {
    pub reference: Source,
    pub other: Source,
    pub path: PathBuf,
    pub mean_errors: Vec<f64>,
    pub color: Rgb,
}

#[derive(Debug, Deserialize)]
struct MeanErrorRow {
    #[serde(rename = "meanError")]
    mean_error: Option<f64>,
}

pub fn comparison_file_name(first: Source, second: Source) -> String {
    format!("compare-{}-{}.csv", first.token(), second.token())
}

pub fn resolve_comparison_path(
    input_dir: &Path,
    reference: Source,
    other: Source,
    policy: LookupPolicy,
) -> Result<PathBuf, InputError> {
    let direct = comparison_file_name(reference, other);
    if let Some(path) = find_csv(input_dir, &direct) {
        return Ok(path);
    }
    if policy == LookupPolicy::ReversedFallback {
        let reversed = comparison_file_name(other, reference);
        if let Some(path) = find_csv(input_dir, &reversed) {
            tracing::warn!(
                "{} not found; using reversed comparison {}",
                direct,
                path.display()
            );
            return Ok(path);
        }
    }
    Err(InputError::MissingInput(format!(
        "no comparison file for {reference}/{other} in {} (lookup: {policy:?})",
        input_dir.display()
    )))
}

pub fn load_mean_errors(path: &Path) -> Result<Vec<f64>, InputError> {
    let mut reader = csv_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| InputError::csv(path, e))?
        .clone();
    if !headers.iter().any(|h| h == MEAN_ERROR_COLUMN) {
        return Err(InputError::Parse(format!(
            "{}: missing column {MEAN_ERROR_COLUMN}",
            path.display()
        )));
    }

    let mut values = Vec::new();
    for row in reader.deserialize::<MeanErrorRow>() {
        let row = row.map_err(|e| InputError::csv(path, e))?;
        // Blank cells are kept as NaN and dropped by the box statistics.
        values.push(row.mean_error.unwrap_or(f64::NAN));
    }

    if values.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "{}: no {MEAN_ERROR_COLUMN} values",
            path.display()
        )));
    }
    Ok(values)
}

/// Loads one record per ordered pair of distinct sources, grouped by reference.
pub fn load_comparisons(
    input_dir: &Path,
    policy: LookupPolicy,
) -> Result<Vec<ComparisonRecord>, InputError> {
    let mut records = Vec::with_capacity(Source::ALL.len() * (Source::ALL.len() - 1));
    for reference in Source::ALL {
        for other in reference.others() {
            let path = resolve_comparison_path(input_dir, reference, other, policy)?;
            let mean_errors = load_mean_errors(&path)?;
            tracing::debug!(
                "loaded {} meanError values from {}",
                mean_errors.len(),
                path.display()
            );
            records.push(ComparisonRecord {
                reference,
                other,
                path,
                mean_errors,
                color: other.color(),
            });
        }
    }
    tracing::info!(
        "loaded {} pairwise comparisons from {}",
        records.len(),
        input_dir.display()
    );
    Ok(records)
}
