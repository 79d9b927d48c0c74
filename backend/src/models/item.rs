//! Tracked inventory items.

use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, ItemId);

/// Lightweight item listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub item_id: ItemId,
    pub item_name: String,
    pub movement_count: usize,
}
