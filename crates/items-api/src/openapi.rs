//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented item routes into one OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Items API",
        version = "0.1.0",
        description = "CRUD API over a single table of items (name + optional description).",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::items::list_items,
        crate::routes::items::get_item,
        crate::routes::items::create_item,
        crate::routes::items::update_item,
        crate::routes::items::delete_item,
    ),
    components(schemas(
        crate::item::Item,
        crate::routes::items::CreateItemRequest,
        crate::routes::items::UpdateItemRequest,
        crate::error::ErrorBody,
        crate::error::ValidationErrorBody,
        crate::extractors::FieldError,
    )),
    tags(
        (name = "items", description = "Item create/read/update/delete"),
    )
)]
pub struct ApiDoc;

/// Router serving `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
