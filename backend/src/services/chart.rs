//! Projection of a [`FlowSeriesResult`] onto chart datasets.
//!
//! The chart draws outflow below the zero line, so it is negated here. The
//! projection is a plain value; whoever owns the chart updates it in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FlowSeriesResult, Granularity};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl From<[f64; 2]> for AxisBounds {
    fn from(domain: [f64; 2]) -> Self {
        Self {
            min: domain[0],
            max: domain[1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDatasets {
    pub labels: Vec<DateTime<Utc>>,
    /// Negated outflow, drawn below zero.
    pub outflow: Vec<f64>,
    pub inflow: Vec<f64>,
    pub stock: Vec<f64>,
    pub flow_axis: AxisBounds,
    pub stock_axis: AxisBounds,
    pub time_unit: Granularity,
}

impl ChartDatasets {
    pub fn from_result(result: &FlowSeriesResult) -> Self {
        Self {
            labels: result.points.iter().map(|p| p.t).collect(),
            outflow: result
                .points
                .iter()
                .map(|p| if p.outflow == 0.0 { 0.0 } else { -p.outflow })
                .collect(),
            inflow: result.points.iter().map(|p| p.inflow).collect(),
            stock: result.points.iter().map(|p| p.stock).collect(),
            flow_axis: result.flow_domain.into(),
            stock_axis: result.stock_domain.into(),
            time_unit: result.granularity,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<&FlowSeriesResult> for ChartDatasets {
    fn from(result: &FlowSeriesResult) -> Self {
        Self::from_result(result)
    }
}
