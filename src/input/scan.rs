use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::InputError;
use crate::input::reader::csv_reader;

pub const SCAN_COLUMNS: [&str; 3] = ["scale", "renderFactor", "mean"];

/// `scale` and `renderFactor` keep their CSV text since they are only shown as labels.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScanRow {
    pub scale: String,
    #[serde(rename = "renderFactor")]
    pub render_factor: String,
    pub mean: f64,
}

pub fn load_parameter_scan(path: &Path) -> Result<Vec<ScanRow>, InputError> {
    let mut reader = csv_reader(path)?;
    let headers = reader
        .headers()
        .map_err(|e| InputError::csv(path, e))?
        .clone();
    let missing: Vec<&str> = SCAN_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(InputError::Parse(format!(
            "{}: missing column(s) {}",
            path.display(),
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for row in reader.deserialize::<ScanRow>() {
        rows.push(row.map_err(|e| InputError::csv(path, e))?);
    }
    tracing::info!("loaded {} parameter-scan rows from {}", rows.len(), path.display());
    Ok(rows)
}
