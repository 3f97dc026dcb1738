//! # Item Records
//!
//! The single persisted entity of the Items stack and the write shapes the
//! store accepts. These types carry already-validated data; request parsing
//! and field checks live in [`crate::routes::items`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned item identifier.
pub type ItemId = i64;

/// A persisted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Item {
    /// Unique, immutable, assigned on creation.
    pub id: ItemId,
    /// Never empty.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields for a new item. `name` has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// Apply the patch to an in-memory record.
    pub fn apply(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }
    }
}
