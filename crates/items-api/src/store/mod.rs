//! # Item Store
//!
//! Persistence abstraction for items. Handlers only ever see
//! `Arc<dyn ItemStore>`; the concrete backend is chosen at startup:
//!
//! - [`memory::MemoryItemStore`]: process-local, used when `DATABASE_URL`
//!   is absent and as the test fake.
//! - [`crate::db::items::PgItemStore`]: PostgreSQL via SQLx.
//!
//! Absence is a value (`Option`/`bool`), never an error. `StoreError` is
//! reserved for backend failures.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::item::{Item, ItemId, ItemPatch, NewItem};

pub use memory::MemoryItemStore;

/// Persistence failure. Never shown to API clients.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database rejected or failed the statement.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD operations over the item table.
///
/// Every mutating call maps to exactly one atomic statement in the backend.
#[async_trait]
pub trait ItemStore: Send + Sync + std::fmt::Debug {
    /// All items, ascending by id.
    async fn list_all(&self) -> Result<Vec<Item>, StoreError>;

    /// The item with `id`, or `None`.
    async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Persist a new item under a fresh id.
    async fn create(&self, item: NewItem) -> Result<Item, StoreError>;

    /// Apply `patch` to an existing item. Returns `None` if `id` does not
    /// exist; never creates.
    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError>;

    /// Remove the item. Returns `false` if it did not exist.
    async fn delete(&self, id: ItemId) -> Result<bool, StoreError>;

    /// Connectivity check for the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
