use std::path::{Path, PathBuf};

pub mod comparison;
pub mod reader;
pub mod scan;

pub use comparison::{ComparisonRecord, LookupPolicy, load_comparisons};
pub use scan::{ScanRow, load_parameter_scan};

pub const PARAMETER_SCAN_FILE: &str = "comparison-parameter-scan.csv";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl InputError {
    pub(crate) fn csv(path: &Path, err: csv::Error) -> Self {
        InputError::Parse(format!("{}: {err}", path.display()))
    }
}

/// Returns the first existing file among `name` and `name.gz` inside `dir`.
pub fn find_csv(dir: &Path, name: &str) -> Option<PathBuf> {
    let plain = dir.join(name);
    if plain.is_file() {
        return Some(plain);
    }
    let gz = dir.join(format!("{name}.gz"));
    if gz.is_file() {
        return Some(gz);
    }
    None
}

pub fn resolve_parameter_scan(input_dir: &Path) -> Result<PathBuf, InputError> {
    find_csv(input_dir, PARAMETER_SCAN_FILE).ok_or_else(|| {
        InputError::MissingInput(format!(
            "{} not found in {}",
            PARAMETER_SCAN_FILE,
            input_dir.display()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
