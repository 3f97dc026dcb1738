//! # Items API
//!
//! Routes:
//! - `GET    /api/items`: list all items
//! - `POST   /api/items`: create an item (validated)
//! - `GET    /api/items/{id}`: get one item
//! - `PUT    /api/items/{id}`: partially update an item (validated)
//! - `DELETE /api/items/{id}`: delete an item
//!
//! Handlers hold no logic beyond mapping: path parsing, one store call, and
//! the translation of absence/failure into [`AppError`]. A path id that is
//! not an integer is treated as a lookup miss (404).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{present, Validate, ValidatedJson, ValidationErrors};
use crate::item::{Item, ItemId, ItemPatch, NewItem};
use crate::state::AppState;

const NOT_FOUND: &str = "Item not found";

/// Body of `POST /api/items`.
///
/// Fields are kept as raw JSON so type mismatches are reported per field
/// instead of as a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    /// Required, non-blank.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = String)]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
}

impl Validate for CreateItemRequest {
    type Valid = NewItem;

    fn validate(self) -> Result<NewItem, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = match self.name {
            Some(Value::String(name)) if !name.trim().is_empty() => Some(name),
            None | Some(Value::Null) | Some(Value::String(_)) => {
                errors.push("name", "Name is required");
                None
            }
            Some(_) => {
                errors.push("name", "Name must be a string");
                None
            }
        };

        let description = match self.description {
            None => None,
            Some(Value::String(text)) => Some(text),
            Some(_) => {
                errors.push("description", "Description must be a string");
                None
            }
        };

        match name {
            Some(name) if errors.is_empty() => Ok(NewItem { name, description }),
            _ => Err(errors),
        }
    }
}

/// Body of `PUT /api/items/{id}`. Absent fields are left unchanged.
/// A supplied `description` must be a string; `null` is rejected.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
}

impl Validate for UpdateItemRequest {
    type Valid = ItemPatch;

    fn validate(self) -> Result<ItemPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = match self.name {
            None => None,
            Some(Value::String(name)) if !name.trim().is_empty() => Some(name),
            Some(Value::Null) | Some(Value::String(_)) => {
                errors.push("name", "Name cannot be empty");
                None
            }
            Some(_) => {
                errors.push("name", "Name must be a string");
                None
            }
        };

        let description = match self.description {
            None => None,
            Some(Value::String(text)) => Some(text),
            Some(_) => {
                errors.push("description", "Description must be a string");
                None
            }
        };

        errors.into_result(ItemPatch { name, description })
    }
}

/// Build the items router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

fn parse_id(raw: &str) -> Result<ItemId, AppError> {
    raw.trim().parse().map_err(|_| {
        tracing::debug!(id = raw, "non-integer item id treated as lookup miss");
        AppError::NotFound(NOT_FOUND.to_string())
    })
}

/// GET /api/items: List all items.
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "All items", body = Vec<Item>),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, AppError> {
    let items = state
        .store
        .list_all()
        .await
        .map_err(AppError::store("Error fetching items"))?;
    Ok(Json(items))
}

/// GET /api/items/{id}: Get one item.
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(&raw_id)?;
    state
        .store
        .get_by_id(id)
        .await
        .map_err(AppError::store("Error fetching item"))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
}

/// POST /api/items: Create an item.
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Validation failed", body = crate::error::ValidationErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(new_item): ValidatedJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let item = state
        .store
        .create(new_item)
        .await
        .map_err(AppError::store("Error creating item"))?;
    tracing::info!(item_id = item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/{id}: Partially update an item.
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "Item ID")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Validation failed", body = crate::error::ValidationErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(patch): ValidatedJson<UpdateItemRequest>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(&raw_id)?;
    let item = state
        .store
        .update(id, patch)
        .await
        .map_err(AppError::store("Error updating item"))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
    tracing::info!(item_id = item.id, "item updated");
    Ok(Json(item))
}

/// DELETE /api/items/{id}: Delete an item.
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw_id)?;
    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(AppError::store("Error deleting item"))?;
    if !deleted {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    tracing::info!(item_id = id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
