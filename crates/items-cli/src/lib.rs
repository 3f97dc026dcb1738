//! # items-cli: Terminal front end for the Items API
//!
//! ## Subcommands
//!
//! - `items list`: print every item.
//! - `items show <id>`: print one item.
//! - `items add <name> [--description]`: create an item.
//! - `items edit <id> [--name] [--description | --clear-description]`
//! - `items rm <id>`: delete an item.
//!
//! Mutations go through [`items_client::ItemListState`], so each prints the
//! re-fetched list and fails with the state's error text.

pub mod commands;
