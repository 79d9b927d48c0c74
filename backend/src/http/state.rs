//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ChartSettings;
use crate::db::repository::MovementRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository supplying movement histories
    pub repository: Arc<dyn MovementRepository>,
    /// Defaults for flow-series requests
    pub chart: ChartSettings,
}

impl AppState {
    pub fn new(repository: Arc<dyn MovementRepository>) -> Self {
        Self {
            repository,
            chart: ChartSettings::default(),
        }
    }

    pub fn with_chart_settings(mut self, chart: ChartSettings) -> Self {
        self.chart = chart;
        self
    }
}
