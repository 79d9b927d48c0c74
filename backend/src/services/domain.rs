//! Display ranges for the flow and stock axes.

use crate::models::SeriesPoint;

pub const DEFAULT_FLOW_PADDING_MULTIPLIER: f64 = 1.2;
pub const DEFAULT_MIN_ABS_FLOW_DOMAIN: f64 = 1.0;
pub const STOCK_PADDING_RATIO: f64 = 0.05;

/// Zero-centred flow range: `[-padded, padded]` with
/// `padded = max(min_abs, peak * multiplier)`.
pub fn flow_domain(points: &[SeriesPoint], padding_multiplier: f64, min_abs: f64) -> [f64; 2] {
    let peak = points
        .iter()
        .map(|p| p.inflow.max(p.outflow))
        .fold(0.0_f64, f64::max);
    let padded = min_abs.max(peak * padding_multiplier);
    [-padded, padded]
}

/// Stock range padded by 5% of its span (span at least 1).
///
/// Without points, or with non-finite stock values, the range is built
/// around `[0, 1]`.
pub fn stock_domain(points: &[SeriesPoint]) -> [f64; 2] {
    let (mut min, mut max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.stock), hi.max(p.stock))
        });
    if !min.is_finite() || !max.is_finite() {
        min = 0.0;
        max = 1.0;
    }
    let pad = (max - min).max(1.0) * STOCK_PADDING_RATIO;
    [min - pad, max + pad]
}
