//! In-memory repository for local development and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::repository::{ErrorContext, MovementRepository, RepositoryError, RepositoryResult};
use crate::models::{ItemId, ItemInfo, RawMovement};

#[derive(Debug, Clone)]
struct StoredItem {
    name: String,
    movements: Vec<RawMovement>,
}

impl StoredItem {
    fn info(&self, item_id: ItemId) -> ItemInfo {
        ItemInfo {
            item_id,
            item_name: self.name.clone(),
            movement_count: self.movements.len(),
        }
    }
}

#[derive(Debug, Default)]
struct LocalData {
    items: HashMap<ItemId, StoredItem>,
}

/// Thread-safe in-memory [`MovementRepository`].
///
/// Clones share the same storage.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
    next_id: Arc<AtomicI64>,
    healthy: Arc<AtomicBool>,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
            next_id: Arc::new(AtomicI64::new(1)),
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate an unavailable backend.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn item_count(&self) -> usize {
        self.data.read().items.len()
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Local repository is marked unhealthy",
                ErrorContext::new(operation),
            ))
        }
    }

    fn missing_item(operation: &str, item_id: ItemId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Item {} not found", item_id),
            ErrorContext::new(operation)
                .with_entity("item")
                .with_entity_id(item_id),
        )
    }
}

#[async_trait]
impl MovementRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.healthy.load(Ordering::SeqCst))
    }

    async fn list_items(&self) -> RepositoryResult<Vec<ItemInfo>> {
        self.ensure_healthy("list_items")?;
        let data = self.data.read();
        let mut items: Vec<ItemInfo> = data.items.iter().map(|(id, item)| item.info(*id)).collect();
        items.sort_by_key(|item| item.item_id);
        Ok(items)
    }

    async fn create_item(
        &self,
        name: &str,
        movements: Vec<RawMovement>,
    ) -> RepositoryResult<ItemInfo> {
        self.ensure_healthy("create_item")?;
        let item_id = ItemId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let item = StoredItem {
            name: name.to_string(),
            movements,
        };
        let info = item.info(item_id);
        self.data.write().items.insert(item_id, item);
        log::debug!("Stored item {} ('{}') with {} movements", item_id, name, info.movement_count);
        Ok(info)
    }

    async fn get_item(&self, item_id: ItemId) -> RepositoryResult<ItemInfo> {
        self.ensure_healthy("get_item")?;
        self.data
            .read()
            .items
            .get(&item_id)
            .map(|item| item.info(item_id))
            .ok_or_else(|| Self::missing_item("get_item", item_id))
    }

    async fn fetch_movements(&self, item_id: ItemId) -> RepositoryResult<Vec<RawMovement>> {
        self.ensure_healthy("fetch_movements")?;
        self.data
            .read()
            .items
            .get(&item_id)
            .map(|item| item.movements.clone())
            .ok_or_else(|| Self::missing_item("fetch_movements", item_id))
    }

    async fn append_movements(
        &self,
        item_id: ItemId,
        movements: Vec<RawMovement>,
    ) -> RepositoryResult<ItemInfo> {
        self.ensure_healthy("append_movements")?;
        let mut data = self.data.write();
        let item = data
            .items
            .get_mut(&item_id)
            .ok_or_else(|| Self::missing_item("append_movements", item_id))?;
        item.movements.extend(movements);
        Ok(item.info(item_id))
    }
}
