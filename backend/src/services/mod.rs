//! Flow-series engine.
//!
//! Each stage lives in its own module and is usable on its own;
//! [`compute_flow_series`] chains them.

pub mod buckets;
pub mod chart;
pub mod domain;
pub mod flow;
pub mod flow_series;
pub mod normalizer;
pub mod opening_stock;
pub mod stock;
pub mod window;

pub use buckets::{bucket_start, generate_buckets, next_bucket_start};
pub use chart::{AxisBounds, ChartDatasets};
pub use domain::{
    flow_domain, stock_domain, DEFAULT_FLOW_PADDING_MULTIPLIER, DEFAULT_MIN_ABS_FLOW_DOMAIN,
};
pub use flow::{aggregate_flows, BucketFlow};
pub use flow_series::{compute_flow_series, FlowSeriesOptions};
pub use normalizer::normalize_movements;
pub use opening_stock::{reconstruct_opening_stock, OpeningStock};
pub use stock::integrate_stock;
pub use window::{resolve_named_window, resolve_window};
