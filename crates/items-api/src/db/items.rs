//! Item persistence on the `items` table.
//!
//! Each trait method is one SQL statement, so Postgres provides the
//! atomicity for create/update/delete.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::item::{Item, ItemId, ItemPatch, NewItem};
use crate::store::{ItemStore, StoreError};

/// Postgres-backed [`ItemStore`].
#[derive(Debug, Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for shutdown.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, description FROM items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, name, description FROM items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn create(&self, item: NewItem) -> Result<Item, StoreError> {
        let created = sqlx::query_as::<_, Item>(
            "INSERT INTO items (name, description) VALUES ($1, $2)
             RETURNING id, name, description",
        )
        .bind(&item.name)
        .bind(&item.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        let updated = sqlx::query_as::<_, Item>(
            "UPDATE items
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description)
             WHERE id = $1
             RETURNING id, name, description",
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
