//! # Item List State
//!
//! Front-end state for an item list screen: the list itself, one optional
//! edit draft, the request phase, and a single error slot.
//!
//! The list is never patched locally. Every successful mutation is followed
//! by a full re-fetch, so the list always mirrors the server.
//!
//! Each operation clears the error slot when it starts and sets it when it
//! fails; the slot holds only the most recent error. Mutating operations
//! return `true` when the mutation itself succeeded.

use crate::error::ClientError;
use crate::items::ItemClient;
use crate::types::{CreateItem, Item, ItemId, UpdateItem};

/// Shown instead of sending a request with a blank name.
pub const EMPTY_NAME_MESSAGE: &str = "Item name cannot be empty.";

/// Request phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Fetching the list.
    Loading,
    /// A create, update or delete is in flight.
    Submitting,
}

/// The in-progress edit of one item.
///
/// `name` and `description` hold the raw field text. Both are sent as typed;
/// an emptied description is saved as empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: ItemId,
    pub name: String,
    pub description: String,
}

impl EditDraft {
    fn from_item(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
        }
    }

    fn to_update(&self) -> UpdateItem {
        UpdateItem {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
        }
    }
}

/// List, edit draft, phase and error slot over an [`ItemClient`].
#[derive(Debug)]
pub struct ItemListState {
    client: ItemClient,
    items: Vec<Item>,
    editing: Option<EditDraft>,
    phase: Phase,
    error: Option<String>,
}

impl ItemListState {
    pub fn new(client: ItemClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            editing: None,
            phase: Phase::Idle,
            error: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    /// Mutable access to the draft fields.
    pub fn editing_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Replace the list with the server's. Returns `false` on failure, in
    /// which case the previous list is kept.
    pub async fn refresh(&mut self) -> bool {
        self.error = None;
        self.phase = Phase::Loading;
        let result = self.client.list().await;
        self.phase = Phase::Idle;
        match result {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(err) => {
                self.fail("fetch items", &err);
                false
            }
        }
    }

    /// Create an item, then refresh. A blank name is rejected locally; the
    /// fields are otherwise sent exactly as given.
    pub async fn create(&mut self, name: &str, description: Option<&str>) -> bool {
        self.error = None;
        if name.trim().is_empty() {
            self.error = Some(EMPTY_NAME_MESSAGE.to_string());
            return false;
        }
        let item = CreateItem {
            name: name.to_string(),
            description: description.map(str::to_string),
        };

        self.phase = Phase::Submitting;
        let result = self.client.create(&item).await;
        self.phase = Phase::Idle;
        match result {
            Ok(created) => {
                tracing::info!(item_id = created.id, "item created");
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail("create item", &err);
                false
            }
        }
    }

    /// Start editing `id`, discarding any other draft. Returns `false` if the
    /// item is not in the current list.
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        match self.items.iter().find(|item| item.id == id) {
            Some(item) => {
                self.editing = Some(EditDraft::from_item(item));
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Send the draft as an update, then refresh. On failure the draft is
    /// kept so the user can retry or cancel.
    pub async fn save_edit(&mut self) -> bool {
        self.error = None;
        let Some(draft) = self.editing.as_ref() else {
            return false;
        };
        if draft.name.trim().is_empty() {
            self.error = Some(EMPTY_NAME_MESSAGE.to_string());
            return false;
        }
        let id = draft.id;
        let update = draft.to_update();

        self.phase = Phase::Submitting;
        let result = self.client.update(id, &update).await;
        self.phase = Phase::Idle;
        match result {
            Ok(_) => {
                tracing::info!(item_id = id, "item updated");
                self.editing = None;
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail("update item", &err);
                false
            }
        }
    }

    /// Delete an item, then refresh. A draft of the deleted item is dropped.
    pub async fn delete(&mut self, id: ItemId) -> bool {
        self.error = None;
        self.phase = Phase::Submitting;
        let result = self.client.delete(id).await;
        self.phase = Phase::Idle;
        match result {
            Ok(()) => {
                tracing::info!(item_id = id, "item deleted");
                if self.editing.as_ref().is_some_and(|d| d.id == id) {
                    self.editing = None;
                }
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail("delete item", &err);
                false
            }
        }
    }

    fn fail(&mut self, action: &str, err: &ClientError) {
        tracing::warn!(error = %err, "failed to {action}");
        self.error = Some(err.display_message());
    }
}
