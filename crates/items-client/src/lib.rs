//! # items-client: Typed Rust client for the Items API
//!
//! Two layers:
//! - [`ItemClient`]: one method per endpoint, returning typed items or a
//!   [`ClientError`] that carries the server's message.
//! - [`ItemListState`]: list/edit/error state for a front end, refreshing
//!   from the server after every mutation.
//!
//! ```no_run
//! # async fn demo() -> Result<(), items_client::ClientError> {
//! use items_client::{ClientConfig, ItemClient, ItemListState};
//!
//! let client = ItemClient::new(&ClientConfig::from_env()?)?;
//! let mut state = ItemListState::new(client);
//! state.refresh().await;
//! state.create("Widget", Some("blue")).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod items;
pub mod state;
pub mod types;

pub use config::ClientConfig;
pub use error::ClientError;
pub use items::ItemClient;
pub use state::{EditDraft, ItemListState, Phase};
pub use types::{CreateItem, Item, ItemId, UpdateItem};
