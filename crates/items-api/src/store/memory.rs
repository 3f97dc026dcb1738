//! In-memory item store.
//!
//! All operations are synchronous under a `parking_lot::RwLock`; the lock is
//! never held across an `.await`. Data is lost on restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ItemStore, StoreError};
use crate::item::{Item, ItemId, ItemPatch, NewItem};

#[derive(Debug)]
struct Inner {
    next_id: ItemId,
    items: BTreeMap<ItemId, Item>,
}

/// Thread-safe, cloneable in-memory item store.
///
/// Clones share the same data. Ids start at 1 and are never reused, even
/// after deletion.
#[derive(Debug, Clone)]
pub struct MemoryItemStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                next_id: 1,
                items: BTreeMap::new(),
            })),
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.inner.read().items.values().cloned().collect())
    }

    async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.inner.read().items.get(&id).cloned())
    }

    async fn create(&self, item: NewItem) -> Result<Item, StoreError> {
        let mut guard = self.inner.write();
        let id = guard.next_id;
        guard.next_id += 1;
        let record = Item {
            id,
            name: item.name,
            description: item.description,
        };
        guard.items.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        let mut guard = self.inner.write();
        Ok(guard.items.get_mut(&id).map(|item| {
            patch.apply(item);
            item.clone()
        }))
    }

    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        Ok(self.inner.write().items.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
