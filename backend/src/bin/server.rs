//! Stockflow HTTP Server Binary
//!
//! Loads configuration, seeds the in-memory repository and serves the REST
//! API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin stockflow-server
//!
//! # Seed one item from an inventory export
//! STOCKFLOW_SEED_FILE=movements.json cargo run --bin stockflow-server
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKFLOW_CONFIG`: Path to the TOML configuration file
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `STOCKFLOW_BUCKET_ZONE`: `local`, `utc` or a fixed offset such as `+02:00`
//! - `STOCKFLOW_SEED_FILE`: JSON movements loaded at startup
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use stockflow::config::AppConfig;
use stockflow::db::{self, LocalRepository, MovementRepository};
use stockflow::http::{create_router, AppState};
use stockflow::parsing::parse_movements_json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Also installs the `log` bridge so library records reach the subscriber.
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Stockflow HTTP Server");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        "Chart defaults: preset={}, bucket_zone={}, flow_padding_multiplier={}",
        config.chart.default_preset, config.chart.bucket_zone, config.chart.flow_padding_multiplier
    );

    let repository: Arc<dyn MovementRepository> = Arc::new(LocalRepository::new());
    if let Some(path) = &config.seed.movements_file {
        let movements = parse_movements_json(path)?;
        let item = db::store_item(repository.as_ref(), &config.seed.item_name, movements)
            .await
            .context("Failed to seed repository")?;
        info!(
            "Seeded item {} ('{}') with {} movements from {}",
            item.item_id,
            item.item_name,
            item.movement_count,
            path.display()
        );
    }

    let state = AppState::new(repository).with_chart_settings(config.chart);
    let app = create_router(state);

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    let addr = listener.local_addr()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
