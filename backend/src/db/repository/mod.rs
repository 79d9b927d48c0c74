//! Repository trait for the movement-supplying collaborator.

use async_trait::async_trait;

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::models::{ItemId, ItemInfo, RawMovement};

/// Storage of per-item movement histories.
///
/// Movements are returned in the order they were stored; the engine relies on
/// that order to break timestamp ties.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait MovementRepository: Send + Sync {
    /// Check that the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List all items, ordered by id.
    async fn list_items(&self) -> RepositoryResult<Vec<ItemInfo>>;

    /// Store a new item with its initial history.
    async fn create_item(
        &self,
        name: &str,
        movements: Vec<RawMovement>,
    ) -> RepositoryResult<ItemInfo>;

    /// # Errors
    /// `NotFound` if no item has this id.
    async fn get_item(&self, item_id: ItemId) -> RepositoryResult<ItemInfo>;

    /// Full, unwindowed movement history of one item.
    ///
    /// # Errors
    /// `NotFound` if no item has this id.
    async fn fetch_movements(&self, item_id: ItemId) -> RepositoryResult<Vec<RawMovement>>;

    /// Append movements to an existing item's history.
    async fn append_movements(
        &self,
        item_id: ItemId,
        movements: Vec<RawMovement>,
    ) -> RepositoryResult<ItemInfo>;
}
