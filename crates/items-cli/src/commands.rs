//! Subcommand definitions and handlers.

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;

use items_client::{Item, ItemClient, ItemId, ItemListState};

/// Item subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all items.
    List,

    /// Show one item.
    Show {
        /// Item identifier.
        id: ItemId,
    },

    /// Create an item.
    Add {
        /// Item name (must not be blank).
        name: String,
        /// Optional description.
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Edit an existing item.
    Edit {
        /// Item identifier.
        id: ItemId,
        /// New name.
        #[arg(long, short)]
        name: Option<String>,
        /// New description.
        #[arg(long, short, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description.
        #[arg(long)]
        clear_description: bool,
    },

    /// Delete an item.
    #[command(alias = "delete")]
    Rm {
        /// Item identifier.
        id: ItemId,
    },
}

/// Run one subcommand against the API, returning the text to print.
pub async fn run_command(command: Command, client: ItemClient) -> Result<String> {
    if let Command::Show { id } = command {
        return match client.get(id).await {
            Ok(Some(item)) => Ok(render_item(&item)),
            Ok(None) => bail!("Item not found"),
            Err(err) => bail!(err.display_message()),
        };
    }

    let mut state = ItemListState::new(client);
    match command {
        Command::List | Command::Show { .. } => {
            state.refresh().await;
        }
        Command::Add { name, description } => {
            state.create(&name, description.as_deref()).await;
        }
        Command::Edit {
            id,
            name,
            description,
            clear_description,
        } => {
            if !state.refresh().await {
                return Err(state_error(&state));
            }
            if !state.begin_edit(id) {
                bail!("Item not found");
            }
            if let Some(draft) = state.editing_mut() {
                if let Some(name) = name {
                    draft.name = name;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
                if clear_description {
                    draft.description.clear();
                }
            }
            state.save_edit().await;
        }
        Command::Rm { id } => {
            state.delete(id).await;
        }
    }

    if state.error().is_some() {
        return Err(state_error(&state));
    }
    Ok(render_list(state.items()))
}

fn state_error(state: &ItemListState) -> anyhow::Error {
    anyhow!(state.error().unwrap_or("unknown error").to_string())
}

/// One line per item: id, name, and the description when present.
pub fn render_list(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items found. Add some with `items add <name>`.".to_string();
    }
    items
        .iter()
        .map(|item| match shown_description(item) {
            Some(description) => format!("{:>4}  {}  ({description})", item.id, item.name),
            None => format!("{:>4}  {}", item.id, item.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line detail view of one item.
pub fn render_item(item: &Item) -> String {
    format!(
        "id:          {}\nname:        {}\ndescription: {}",
        item.id,
        item.name,
        shown_description(item).unwrap_or("-")
    )
}

/// A cleared description is stored as empty text; show it as absent.
fn shown_description(item: &Item) -> Option<&str> {
    item.description.as_deref().filter(|d| !d.is_empty())
}
