//! Opening stock reconstruction.
//!
//! Works on the full, unwindowed history. Rules are tried in a fixed order:
//!
//! 1. `quantity_before` of the first movement at or after `from`.
//! 2. `quantity_after` of the latest movement before `from` (missing counts as 0).
//! 3. `quantity_after - delta` of the first movement at or after `from`.
//! 4. 0 when there is no history at all.

use chrono::{DateTime, Utc};

use super::normalizer::{chronological, signed_delta};
use crate::models::{OpeningStockSource, RawMovement};

/// Reconstructed stock level at the start of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningStock {
    pub value: f64,
    pub source: OpeningStockSource,
}

impl OpeningStock {
    pub fn new(value: f64, source: OpeningStockSource) -> Self {
        Self { value, source }
    }

    pub fn overridden(value: f64) -> Self {
        Self::new(value, OpeningStockSource::Override)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

pub fn reconstruct_opening_stock(movements: &[RawMovement], from: DateTime<Utc>) -> OpeningStock {
    let ordered = chronological(movements);
    let split = ordered.partition_point(|m| m.at < from);
    let (before, in_window) = ordered.split_at(split);
    let first_in_window = in_window.first();

    let opening = if let Some(quantity) = first_in_window.and_then(|m| finite(m.quantity_before)) {
        OpeningStock::new(quantity, OpeningStockSource::FirstInWindowQuantityBefore)
    } else if let Some(last) = before.last() {
        OpeningStock::new(
            finite(last.quantity_after).unwrap_or(0.0),
            OpeningStockSource::LastBeforeWindowQuantityAfter,
        )
    } else if let Some(first) = first_in_window {
        OpeningStock::new(
            finite(first.quantity_after).unwrap_or(0.0) - signed_delta(first),
            OpeningStockSource::BackComputedFromFirstInWindow,
        )
    } else {
        OpeningStock::new(0.0, OpeningStockSource::NoHistory)
    };

    log::debug!(
        "Opening stock at {}: {} ({:?}, {} movements before window)",
        from,
        opening.value,
        opening.source,
        before.len()
    );
    opening
}
