//! Flow-series engine entry point.
//!
//! [`compute_flow_series`] runs the whole pipeline for one item:
//! normalize, resolve the window, generate buckets, aggregate flows,
//! reconstruct the opening stock, integrate stock and derive display domains.
//! It is a pure function of its inputs once `now` is fixed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::buckets::generate_buckets;
use super::domain::{
    flow_domain, stock_domain, DEFAULT_FLOW_PADDING_MULTIPLIER, DEFAULT_MIN_ABS_FLOW_DOMAIN,
};
use super::flow::aggregate_flows;
use super::normalizer::normalize_movements;
use super::opening_stock::{reconstruct_opening_stock, OpeningStock};
use super::stock::integrate_stock;
use super::window::resolve_window;
use crate::models::{
    parse_timestamp, BucketZone, FlowSeriesResult, Granularity, OpeningStockSource, RawMovement,
    SeriesPoint, WindowPreset,
};

/// Options of one engine invocation. Every field is optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSeriesOptions {
    /// Window end. Wall-clock time when absent.
    #[serde(deserialize_with = "deserialize_optional_timestamp")]
    pub now: Option<DateTime<Utc>>,
    pub preset: WindowPreset,
    /// Overrides the preset's default granularity. Unknown names are ignored.
    #[serde(deserialize_with = "deserialize_optional_granularity")]
    pub granularity: Option<Granularity>,
    /// Skips reconstruction and starts the series from this value.
    #[serde(alias = "opening_stock")]
    pub opening_stock_override: Option<f64>,
    pub flow_padding_multiplier: Option<f64>,
    pub min_abs_flow_domain: Option<f64>,
    #[serde(rename = "bucket_zone", alias = "zone")]
    pub zone: Option<BucketZone>,
}

impl FlowSeriesOptions {
    pub fn new(preset: WindowPreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    pub fn with_opening_stock(mut self, opening_stock: f64) -> Self {
        self.opening_stock_override = Some(opening_stock);
        self
    }

    pub fn with_flow_padding_multiplier(mut self, multiplier: f64) -> Self {
        self.flow_padding_multiplier = Some(multiplier);
        self
    }

    pub fn with_min_abs_flow_domain(mut self, min_abs: f64) -> Self {
        self.min_abs_flow_domain = Some(min_abs);
        self
    }

    pub fn with_zone(mut self, zone: BucketZone) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Fill unset fields from `base`. `preset` is always kept.
    pub fn or(self, base: &FlowSeriesOptions) -> Self {
        Self {
            now: self.now.or(base.now),
            preset: self.preset,
            granularity: self.granularity.or(base.granularity),
            opening_stock_override: self.opening_stock_override.or(base.opening_stock_override),
            flow_padding_multiplier: self.flow_padding_multiplier.or(base.flow_padding_multiplier),
            min_abs_flow_domain: self.min_abs_flow_domain.or(base.min_abs_flow_domain),
            zone: self.zone.or(base.zone),
        }
    }
}

/// Keep finite values only; anything else is treated as unset.
fn finite_option(name: &str, value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if !v.is_finite() => {
            log::warn!("Ignoring non-finite {}: {}", name, v);
            None
        }
        other => other,
    }
}

/// Compute the gap-free inflow/outflow/stock series for one item.
///
/// Never fails: empty or malformed input degrades to zero flows.
pub fn compute_flow_series(
    movements: &[RawMovement],
    options: &FlowSeriesOptions,
) -> FlowSeriesResult {
    let now = options.now.unwrap_or_else(Utc::now);
    let preset = options.preset;
    let granularity = options
        .granularity
        .unwrap_or_else(|| preset.default_granularity());
    let zone = options.zone.unwrap_or_default();
    let padding_multiplier = finite_option("flow_padding_multiplier", options.flow_padding_multiplier)
        .unwrap_or(DEFAULT_FLOW_PADDING_MULTIPLIER);
    let min_abs = finite_option("min_abs_flow_domain", options.min_abs_flow_domain)
        .unwrap_or(DEFAULT_MIN_ABS_FLOW_DOMAIN);

    let range = resolve_window(preset, now);
    let normalized = normalize_movements(movements);
    let buckets = generate_buckets(&range, granularity, zone);
    let flows = aggregate_flows(&normalized, &range, &buckets, granularity, zone);

    let opening = match finite_option("opening_stock_override", options.opening_stock_override) {
        Some(value) => OpeningStock::overridden(value),
        None => reconstruct_opening_stock(movements, range.from),
    };
    let stocks = integrate_stock(opening.value, &flows);

    let points: Vec<SeriesPoint> = buckets
        .iter()
        .zip(&flows)
        .zip(stocks)
        .map(|((&t, flow), stock)| SeriesPoint {
            t,
            inflow: flow.inflow,
            outflow: flow.outflow,
            stock,
        })
        .collect();

    let flow_domain = flow_domain(&points, padding_multiplier, min_abs);
    // A series without any history carries no stock information.
    let stock_domain = if opening.source == OpeningStockSource::NoHistory {
        stock_domain(&[])
    } else {
        stock_domain(&points)
    };

    log::info!(
        "Computed {} flow series: {} {} buckets from {} movements, opening stock {}",
        preset,
        points.len(),
        granularity,
        movements.len(),
        opening.value
    );

    FlowSeriesResult {
        points,
        flow_domain,
        stock_domain,
        range,
        granularity,
        preset,
        opening_stock: opening.value,
        opening_stock_source: opening.source,
    }
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw))),
    }
}

fn deserialize_optional_granularity<'de, D>(deserializer: D) -> Result<Option<Granularity>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Granularity::parse))
}

#[cfg(test)]
#[path = "flow_series_tests.rs"]
mod flow_series_tests;
