//! Output types of the flow-series engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time::{Granularity, TimeRange, WindowPreset};

/// One bucket of the plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Bucket start.
    pub t: DateTime<Utc>,
    pub inflow: f64,
    pub outflow: f64,
    /// Stock level at the end of the bucket.
    pub stock: f64,
}

/// Which rule produced the opening stock of a window.
///
/// Rules are tried in declaration order (after `Override`); the first one
/// whose data is available wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningStockSource {
    /// Supplied by the caller, reconstruction skipped.
    Override,
    /// `quantity_before` of the first movement at or after the window start.
    FirstInWindowQuantityBefore,
    /// `quantity_after` of the latest movement before the window start.
    LastBeforeWindowQuantityAfter,
    /// `quantity_after - delta` of the first movement in the window.
    BackComputedFromFirstInWindow,
    /// No movement history at all.
    NoHistory,
}

/// Immutable, chart-ready result of one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSeriesResult {
    pub points: Vec<SeriesPoint>,
    /// `[-padded, +padded]`, always symmetric about zero.
    pub flow_domain: [f64; 2],
    pub stock_domain: [f64; 2],
    pub range: TimeRange,
    pub granularity: Granularity,
    pub preset: WindowPreset,
    /// Stock level at `range.from`, before any in-window movement.
    pub opening_stock: f64,
    pub opening_stock_source: OpeningStockSource,
}

impl FlowSeriesResult {
    pub fn total_inflow(&self) -> f64 {
        self.points.iter().map(|p| p.inflow).sum()
    }

    pub fn total_outflow(&self) -> f64 {
        self.points.iter().map(|p| p.outflow).sum()
    }

    /// Stock at the end of the window, or the opening stock for an empty series.
    pub fn closing_stock(&self) -> f64 {
        self.points
            .last()
            .map(|p| p.stock)
            .unwrap_or(self.opening_stock)
    }
}
