//! # Stockflow
//!
//! Inventory flow-series engine.
//!
//! Turns the raw movement history of one stocked item (consumptions and
//! replenishments, each with a timestamp and optional recorded quantities)
//! into a continuous, gap-free series of inflow, outflow and running stock,
//! plus the display ranges a dual-axis chart needs.
//!
//! ## Architecture
//!
//! - [`models`]: Domain types (movements, presets, series points, results)
//! - [`services`]: The engine, one module per pipeline stage
//! - [`parsing`]: JSON movement payload decoding
//! - [`db`]: Repository pattern supplying per-item movement histories
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`api`]: Consolidated public types
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use stockflow::api::{compute_flow_series, BucketZone, FlowSeriesOptions, RawMovement, WindowPreset};
//!
//! let now = Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap();
//! let movements = vec![RawMovement::replenishment(now - chrono::Duration::days(3), 10.0)];
//! let options = FlowSeriesOptions::new(WindowPreset::Week)
//!     .with_now(now)
//!     .with_zone(BucketZone::Utc);
//!
//! let result = compute_flow_series(&movements, &options);
//! assert_eq!(result.points.len(), 8);
//! assert_eq!(result.total_inflow(), 10.0);
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod parsing;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
