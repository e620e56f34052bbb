use serde::Serialize;

use crate::input::ScanRow;
use crate::model::palette::{Rgb, cycle_color};
use crate::pipeline::{TickLabel, padded_range};

pub const GROUP_SIZE: usize = 6;
pub const GROUP_SPACING: usize = 2;
const TICK_COLOR: Rgb = Rgb(0, 0, 0);
const X_MARGIN: f64 = 0.5;
const Y_PAD: f64 = 0.05;

#[derive(Debug, Clone, Serialize)]
pub struct ScanGroup {
    pub index: usize,
    pub label: String,
    pub first_row: usize,
    pub color: Rgb,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct LinePlotLayout {
    pub groups: Vec<ScanGroup>,
    pub ticks: Vec<TickLabel>,
    pub dropped_rows: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

pub fn group_count(n_rows: usize) -> usize {
    n_rows / GROUP_SIZE
}

/// x position of table row `row`; each completed group shifts the rest by the spacing.
pub fn row_position(row: usize) -> f64 {
    (row + (row / GROUP_SIZE) * GROUP_SPACING) as f64
}

pub fn run_stage2(rows: &[ScanRow]) -> LinePlotLayout {
    let n_groups = group_count(rows.len());
    let dropped_rows = rows.len() - n_groups * GROUP_SIZE;
    if dropped_rows > 0 {
        tracing::debug!(
            "parameter scan has {} rows; last {} do not fill a group of {} and are not plotted",
            rows.len(),
            dropped_rows,
            GROUP_SIZE
        );
    }

    let groups: Vec<ScanGroup> = rows
        .chunks_exact(GROUP_SIZE)
        .enumerate()
        .map(|(i, chunk)| {
            let first_row = i * GROUP_SIZE;
            let points = chunk
                .iter()
                .enumerate()
                .map(|(k, row)| (row_position(first_row + k), row.mean))
                .collect();
            ScanGroup {
                index: i,
                label: format!("Scale {}", chunk[0].scale),
                first_row,
                color: cycle_color(i),
                points,
            }
        })
        .collect();

    let ticks: Vec<TickLabel> = rows
        .iter()
        .enumerate()
        .map(|(r, row)| TickLabel {
            x: row_position(r),
            text: row.render_factor.clone(),
            color: TICK_COLOR,
        })
        .collect();

    let x_range = match ticks.last() {
        Some(last) => (-X_MARGIN, last.x + X_MARGIN),
        None => (-X_MARGIN, X_MARGIN),
    };

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (_, y) in groups.iter().flat_map(|g| g.points.iter()) {
        if y.is_finite() {
            lo = lo.min(*y);
            hi = hi.max(*y);
        }
    }
    let y_range = if lo.is_finite() && hi.is_finite() {
        padded_range(lo, hi, Y_PAD)
    } else {
        (0.0, 1.0)
    };

    LinePlotLayout {
        groups,
        ticks,
        dropped_rows,
        x_range,
        y_range,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_scan.rs"]
mod tests;
