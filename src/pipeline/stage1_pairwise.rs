use std::path::PathBuf;

use crate::input::{ComparisonRecord, InputError};
use crate::model::palette::Rgb;
use crate::model::{BoxStats, Source};
use crate::pipeline::{TickLabel, padded_range};

pub const GROUP_STRIDE: usize = 10;
pub const BOX_WIDTH: f64 = 0.5;
pub const X_RANGE: (f64, f64) = (-2.0, 47.0);
const Y_PAD: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct BoxGlyph {
    pub reference: Source,
    pub other: Source,
    pub source_path: PathBuf,
    pub position: f64,
    pub color: Rgb,
    pub stats: BoxStats,
}

#[derive(Debug, Clone)]
pub struct BoxPlotLayout {
    pub boxes: Vec<BoxGlyph>,
    pub ticks: Vec<TickLabel>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

/// Slot `n` of a reference group sits at `10 * group + n + 1`.
pub fn box_position(reference: Source, slot: usize) -> f64 {
    (reference.index() * GROUP_STRIDE + slot + 1) as f64
}

/// Centre of the four boxes of a reference group.
pub fn group_center(reference: Source) -> f64 {
    (reference.index() * GROUP_STRIDE) as f64 + 2.5
}

pub fn category_ticks() -> Vec<TickLabel> {
    Source::ALL
        .iter()
        .map(|&s| TickLabel {
            x: group_center(s),
            text: s.category_label().to_string(),
            color: s.color(),
        })
        .collect()
}

pub fn run_stage1(records: &[ComparisonRecord]) -> Result<BoxPlotLayout, InputError> {
    let mut slots = [0usize; Source::ALL.len()];
    let mut boxes = Vec::with_capacity(records.len());

    for record in records {
        if record.reference == record.other {
            continue;
        }
        let stats = BoxStats::from_values(&record.mean_errors).ok_or_else(|| {
            InputError::InvalidInput(format!(
                "{}: no finite {} values",
                record.path.display(),
                crate::input::comparison::MEAN_ERROR_COLUMN
            ))
        })?;
        let slot = &mut slots[record.reference.index()];
        let position = box_position(record.reference, *slot);
        *slot += 1;

        tracing::debug!(
            "box {}-{} at x={}: median={:.4} q1={:.4} q3={:.4} fliers={}",
            record.reference,
            record.other,
            position,
            stats.median,
            stats.q1,
            stats.q3,
            stats.fliers.len()
        );

        boxes.push(BoxGlyph {
            reference: record.reference,
            other: record.other,
            source_path: record.path.clone(),
            position,
            color: record.color,
            stats,
        });
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for glyph in &boxes {
        let (a, b) = glyph.stats.extent();
        lo = lo.min(a);
        hi = hi.max(b);
    }
    let y_range = if boxes.is_empty() {
        (0.0, 1.0)
    } else {
        padded_range(lo, hi, Y_PAD)
    };

    Ok(BoxPlotLayout {
        boxes,
        ticks: category_ticks(),
        x_range: X_RANGE,
        y_range,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_pairwise.rs"]
mod tests;
