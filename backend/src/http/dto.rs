//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

pub use crate::models::{FlowSeriesResult, ItemInfo, RawMovement};
pub use crate::services::ChartDatasets;

use crate::models::{parse_timestamp, Granularity, WindowPreset};
use crate::services::FlowSeriesOptions;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub repository: String,
}

/// One selectable window preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetDto {
    pub id: WindowPreset,
    pub label: String,
    pub default_granularity: Granularity,
}

impl From<WindowPreset> for PresetDto {
    fn from(preset: WindowPreset) -> Self {
        Self {
            id: preset,
            label: preset.label().to_string(),
            default_granularity: preset.default_granularity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetListResponse {
    pub presets: Vec<PresetDto>,
    pub default_preset: WindowPreset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemInfo>,
    pub total: usize,
}

/// Request body for creating a new item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub movements: Vec<RawMovement>,
}

/// `{"movements": [...]}`, the inventory endpoint shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementsPayload {
    pub movements: Vec<RawMovement>,
}

/// Query parameters for the per-item flow-series endpoint.
///
/// Preset and granularity are plain strings so unknown values fall back
/// instead of being rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlowSeriesQuery {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub granularity: Option<String>,
    #[serde(default)]
    pub now: Option<String>,
    #[serde(default)]
    pub opening_stock: Option<f64>,
    #[serde(default)]
    pub flow_padding_multiplier: Option<f64>,
    #[serde(default)]
    pub min_abs_flow_domain: Option<f64>,
    /// Also return chart datasets.
    #[serde(default)]
    pub chart: bool,
}

impl FlowSeriesQuery {
    /// Build engine options, falling back to `base` for unset fields.
    ///
    /// Only an unparseable `now` is an error.
    pub fn to_options(&self, base: &FlowSeriesOptions) -> Result<FlowSeriesOptions, String> {
        let now = match self.now.as_deref() {
            Some(raw) => Some(
                parse_timestamp(raw).ok_or_else(|| format!("Invalid 'now' timestamp: '{}'", raw))?,
            ),
            None => None,
        };
        let preset = self
            .preset
            .as_deref()
            .map(WindowPreset::parse_or_default)
            .unwrap_or(base.preset);

        let options = FlowSeriesOptions {
            now,
            preset,
            granularity: self.granularity.as_deref().and_then(Granularity::parse),
            opening_stock_override: self.opening_stock,
            flow_padding_multiplier: self.flow_padding_multiplier,
            min_abs_flow_domain: self.min_abs_flow_domain,
            zone: None,
        };
        Ok(options.or(base))
    }
}

/// Request body for a stateless computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeFlowSeriesRequest {
    pub movements: Vec<RawMovement>,
    #[serde(default)]
    pub options: Option<FlowSeriesOptions>,
    #[serde(default)]
    pub chart: bool,
}

/// A flow series, optionally with its chart projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSeriesResponse {
    #[serde(flatten)]
    pub result: FlowSeriesResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartDatasets>,
}

impl FlowSeriesResponse {
    pub fn new(result: FlowSeriesResult, include_chart: bool) -> Self {
        let chart = include_chart.then(|| ChartDatasets::from_result(&result));
        Self { result, chart }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BucketZone;
    use chrono::{TimeZone, Utc};

    fn base() -> FlowSeriesOptions {
        FlowSeriesOptions::new(WindowPreset::Month)
            .with_flow_padding_multiplier(1.2)
            .with_zone(BucketZone::Utc)
    }

    #[test]
    fn test_empty_query_uses_base() {
        let options = FlowSeriesQuery::default().to_options(&base()).unwrap();
        assert_eq!(options, base());
    }

    #[test]
    fn test_query_overrides_base() {
        let query = FlowSeriesQuery {
            preset: Some("day".to_string()),
            granularity: Some("day".to_string()),
            now: Some("2024-04-15T09:41:27Z".to_string()),
            opening_stock: Some(3.0),
            ..FlowSeriesQuery::default()
        };
        let options = query.to_options(&base()).unwrap();

        assert_eq!(options.preset, WindowPreset::Day);
        assert_eq!(options.granularity, Some(Granularity::Day));
        assert_eq!(options.now, Some(Utc.with_ymd_and_hms(2024, 4, 15, 9, 41, 27).unwrap()));
        assert_eq!(options.opening_stock_override, Some(3.0));
        assert_eq!(options.zone, Some(BucketZone::Utc));
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let query = FlowSeriesQuery {
            preset: Some("fortnight".to_string()),
            granularity: Some("minute".to_string()),
            ..FlowSeriesQuery::default()
        };
        let options = query.to_options(&base()).unwrap();
        assert_eq!(options.preset, WindowPreset::Week);
        assert_eq!(options.granularity, None);
    }

    #[test]
    fn test_bad_now_is_rejected() {
        let query = FlowSeriesQuery {
            now: Some("soon".to_string()),
            ..FlowSeriesQuery::default()
        };
        assert!(query.to_options(&base()).is_err());
    }
}
