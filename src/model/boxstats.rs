use serde::Serialize;

pub const WHISKER_IQR_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub n: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_lo: f64,
    pub whisker_hi: f64,
    pub fliers: Vec<f64>,
}

impl BoxStats {
    /// Non-finite values are ignored; `None` when nothing finite remains.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = percentile_linear(&sorted, 0.25);
        let median = percentile_linear(&sorted, 0.5);
        let q3 = percentile_linear(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_limit = q1 - WHISKER_IQR_FACTOR * iqr;
        let hi_limit = q3 + WHISKER_IQR_FACTOR * iqr;

        let whisker_lo = sorted
            .iter()
            .copied()
            .find(|&v| v >= lo_limit)
            .map_or(q1, |v| v.min(q1));
        let whisker_hi = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= hi_limit)
            .map_or(q3, |v| v.max(q3));

        let fliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_lo || v > whisker_hi)
            .collect();

        Some(Self {
            n: sorted.len(),
            q1,
            median,
            q3,
            whisker_lo,
            whisker_hi,
            fliers,
        })
    }

    /// Smallest and largest value drawn for this box, fliers included.
    pub fn extent(&self) -> (f64, f64) {
        let mut lo = self.whisker_lo;
        let mut hi = self.whisker_hi;
        for &f in &self.fliers {
            lo = lo.min(f);
            hi = hi.max(f);
        }
        (lo, hi)
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty and ascending.
pub fn percentile_linear(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/boxstats.rs"]
mod tests;
