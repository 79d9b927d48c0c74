//! Movement storage.
//!
//! The flow-series engine only needs "the full movement list of one item".
//! This module provides that collaborator through the Repository pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, server binary)            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Input validation                                     │
//! │  - Fetch history + run the engine                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/mod.rs)                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! ```ignore
//! use std::sync::Arc;
//! use stockflow::db::{services, LocalRepository, MovementRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo: Arc<dyn MovementRepository> = Arc::new(LocalRepository::new());
//!     let items = services::list_items(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

pub mod repositories;
pub mod repository;
pub mod services;


pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, MovementRepository, RepositoryError, RepositoryResult,
};
pub use services::{
    append_movements, get_item, get_item_flow_series, get_item_movements, health_check,
    list_items, store_item,
};
