//! Public API surface.
//!
//! Consolidates the types a caller needs to run the engine and to talk to
//! the HTTP API. All data types derive Serialize/Deserialize.

pub use crate::models::{
    BucketZone, FlowSeriesResult, Granularity, ItemId, ItemInfo, MovementKind,
    NormalizedMovement, OpeningStockSource, RawMovement, SeriesPoint, TimeRange, WindowPreset,
};
pub use crate::services::{compute_flow_series, AxisBounds, ChartDatasets, FlowSeriesOptions};

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
