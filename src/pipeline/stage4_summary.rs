use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::input::LookupPolicy;
use crate::model::{BoxStats, Rgb, Source, Unit};
use crate::pipeline::stage1_pairwise::BoxPlotLayout;
use crate::pipeline::stage2_scan::{LinePlotLayout, ScanGroup};

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub unit: Unit,
    pub lookup: LookupPolicy,
    pub figures: Vec<String>,
    pub boxes: Vec<BoxSummary<'a>>,
    pub scan_groups: &'a [ScanGroup],
    pub scan_rows_dropped: usize,
}

#[derive(Debug, Serialize)]
pub struct BoxSummary<'a> {
    pub reference: Source,
    pub other: Source,
    pub source_file: String,
    pub position: f64,
    pub color: Rgb,
    pub stats: &'a BoxStats,
}

pub fn build_summary<'a>(
    boxes: &'a BoxPlotLayout,
    scan: &'a LinePlotLayout,
    unit: Unit,
    lookup: LookupPolicy,
    figures: &[PathBuf],
) -> RunSummary<'a> {
    RunSummary {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        unit,
        lookup,
        figures: figures.iter().map(|p| p.display().to_string()).collect(),
        boxes: boxes
            .boxes
            .iter()
            .map(|b| BoxSummary {
                reference: b.reference,
                other: b.other,
                source_file: b
                    .source_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                position: b.position,
                color: b.color,
                stats: &b.stats,
            })
            .collect(),
        scan_groups: &scan.groups,
        scan_rows_dropped: scan.dropped_rows,
    }
}

pub fn write_summary(summary: &RunSummary<'_>, path: &Path) -> Result<(), SummaryError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, summary)?;
    out.write_all(b"\n")?;
    out.flush()?;
    tracing::info!("wrote run summary {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_summary.rs"]
mod tests;
