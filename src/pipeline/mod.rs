use serde::Serialize;

use crate::model::Rgb;

pub mod stage1_pairwise;
pub mod stage2_scan;
pub mod stage3_render;
pub mod stage4_summary;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickLabel {
    pub x: f64,
    pub text: String,
    pub color: Rgb,
}

/// Widens `[lo, hi]` by `frac` of its span on both sides.
pub fn padded_range(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * frac
    } else if lo != 0.0 {
        lo.abs() * frac
    } else {
        1.0
    };
    (lo - pad, hi + pad)
}
