//! High-level operations over any [`MovementRepository`].
//!
//! Application code (the HTTP layer, the server binary) goes through these
//! functions instead of calling repository methods directly.

use crate::models::{FlowSeriesResult, ItemId, ItemInfo, RawMovement};
use crate::services::{compute_flow_series, FlowSeriesOptions};

use super::repository::{ErrorContext, MovementRepository, RepositoryError, RepositoryResult};

pub async fn health_check(repo: &dyn MovementRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

pub async fn list_items(repo: &dyn MovementRepository) -> RepositoryResult<Vec<ItemInfo>> {
    repo.list_items().await
}

/// Store a new item. The name is trimmed and must not be empty.
pub async fn store_item(
    repo: &dyn MovementRepository,
    name: &str,
    movements: Vec<RawMovement>,
) -> RepositoryResult<ItemInfo> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::validation_with_context(
            "Item name must not be empty",
            ErrorContext::new("store_item").with_entity("item"),
        ));
    }

    let info = repo.create_item(name, movements).await?;
    log::info!(
        "Created item {} ('{}') with {} movements",
        info.item_id,
        info.item_name,
        info.movement_count
    );
    Ok(info)
}

pub async fn get_item(repo: &dyn MovementRepository, item_id: ItemId) -> RepositoryResult<ItemInfo> {
    repo.get_item(item_id).await
}

pub async fn get_item_movements(
    repo: &dyn MovementRepository,
    item_id: ItemId,
) -> RepositoryResult<Vec<RawMovement>> {
    repo.fetch_movements(item_id).await
}

pub async fn append_movements(
    repo: &dyn MovementRepository,
    item_id: ItemId,
    movements: Vec<RawMovement>,
) -> RepositoryResult<ItemInfo> {
    let appended = movements.len();
    let info = repo.append_movements(item_id, movements).await?;
    log::info!(
        "Appended {} movements to item {} ({} total)",
        appended,
        item_id,
        info.movement_count
    );
    Ok(info)
}

/// Fetch one item's full history and run the flow-series engine on it.
///
/// Repository failures are the only errors; the computation itself never fails.
pub async fn get_item_flow_series(
    repo: &dyn MovementRepository,
    item_id: ItemId,
    options: &FlowSeriesOptions,
) -> RepositoryResult<FlowSeriesResult> {
    let movements = repo
        .fetch_movements(item_id)
        .await
        .map_err(|e| e.with_operation("get_item_flow_series"))?;
    Ok(compute_flow_series(&movements, options))
}
