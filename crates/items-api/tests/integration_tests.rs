//! # Integration Tests for items-api
//!
//! Drives the full router (validation, handlers, error mapping, fallback)
//! over the in-memory store, plus a failing store for the 500 path.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use items_api::item::{Item, ItemId, ItemPatch, NewItem};
use items_api::state::AppState;
use items_api::store::{ItemStore, MemoryItemStore, StoreError};

/// Helper: build the test app over a fresh in-memory store.
fn test_app() -> axum::Router {
    items_api::app(AppState::in_memory())
}

/// Helper: build the test app over a shared store the test can inspect.
fn test_app_with(store: MemoryItemStore) -> axum::Router {
    items_api::app(AppState::new(Arc::new(store)))
}

fn empty(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// -- Service probes -----------------------------------------------------------

#[tokio::test]
async fn test_root_reports_running() {
    let response = test_app().oneshot(empty(Method::GET, "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Items API is running!");
}

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app()
        .oneshot(empty(Method::GET, "/health/liveness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app()
        .oneshot(empty(Method::GET, "/health/readiness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn test_readiness_fails_when_store_is_down() {
    let app = items_api::app(AppState::new(Arc::new(FailingStore)));
    let response = app
        .oneshot(empty(Method::GET, "/health/readiness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let response = test_app()
        .oneshot(empty(Method::GET, "/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/api/items"].is_object());
    assert!(spec["paths"]["/api/items/{id}"]["put"].is_object());
}

#[tokio::test]
async fn test_metrics_not_mounted_without_recorder() {
    let response = test_app()
        .oneshot(empty(Method::GET, "/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path_returns_json_404() {
    let response = test_app()
        .oneshot(empty(Method::GET, "/api/widgets"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"message": "Not found"}));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/items")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

// -- Item lifecycle -----------------------------------------------------------

#[tokio::test]
async fn test_full_item_lifecycle() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(empty(Method::GET, "/api/items"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/items",
            json!({"name": "Widget", "description": "blue"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["description"], "blue");
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(empty(Method::GET, "/api/items"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([created.clone()]));

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/items/{id}"),
            json!({"name": "Gadget"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": id, "name": "Gadget", "description": "blue"})
    );

    let response = app
        .clone()
        .oneshot(empty(Method::DELETE, &format!("/api/items/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_string(response).await.is_empty());

    let response = app
        .clone()
        .oneshot(empty(Method::GET, &format!("/api/items/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"message": "Item not found"}));

    let response = app
        .oneshot(empty(Method::GET, "/api/items"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_get_returns_created_item() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/items",
            json!({"name": "Lamp"}),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    assert!(created.get("description").is_none());

    let response = app
        .oneshot(empty(
            Method::GET,
            &format!("/api/items/{}", created["id"]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let app = test_app();
    for name in ["c", "a", "b"] {
        app.clone()
            .oneshot(json_request(Method::POST, "/api/items", json!({"name": name})))
            .await
            .unwrap();
    }
    let response = app
        .oneshot(empty(Method::GET, "/api/items"))
        .await
        .unwrap();
    let names: Vec<String> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

// -- Validation ---------------------------------------------------------------

#[tokio::test]
async fn test_create_without_name_is_rejected_and_not_stored() {
    let store = MemoryItemStore::new();
    let app = test_app_with(store.clone());

    for body in [json!({}), json!({"name": ""}), json!({"name": "   "})] {
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/items", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"errors": [{"field": "name", "message": "Name is required"}]})
        );
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_with_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/items")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["message"].is_string());
}

#[tokio::test]
async fn test_update_with_blank_name_leaves_item_unchanged() {
    let store = MemoryItemStore::new();
    let item = store
        .create(NewItem {
            name: "Widget".into(),
            description: None,
        })
        .await
        .unwrap();
    let app = test_app_with(store.clone());

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/items/{}", item.id),
            json!({"name": "  "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"errors": [{"field": "name", "message": "Name cannot be empty"}]})
    );
    assert_eq!(store.get_by_id(item.id).await.unwrap(), Some(item));
}

#[tokio::test]
async fn test_update_rejects_non_string_description() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(Method::POST, "/api/items", json!({"name": "A"})))
        .await
        .unwrap();
    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/items/1",
            json!({"description": 42}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Partial updates ----------------------------------------------------------

#[tokio::test]
async fn test_update_description_only_keeps_name() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/items",
            json!({"name": "Widget", "description": "blue"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/items/1",
            json!({"description": "red"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": 1, "name": "Widget", "description": "red"})
    );
}

#[tokio::test]
async fn test_null_description_is_rejected_and_item_unchanged() {
    let store = MemoryItemStore::new();
    let app = test_app_with(store.clone());
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/items",
            json!({"name": "Widget", "description": "blue"}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/items/1",
            json!({"description": null}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"errors": [{"field": "description", "message": "Description must be a string"}]})
    );
    let stored = store.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.description.as_deref(), Some("blue"));

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/items",
            json!({"name": "Lamp", "description": null}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_update_with_empty_description_stores_empty_text() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/items",
            json!({"name": "Widget", "description": "blue"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/items/1",
            json!({"description": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": 1, "name": "Widget", "description": ""})
    );
}

#[tokio::test]
async fn test_empty_update_returns_current_item() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(Method::POST, "/api/items", json!({"name": "Widget"})))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(Method::PUT, "/api/items/1", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"id": 1, "name": "Widget"}));

    let response = app
        .oneshot(json_request(Method::PUT, "/api/items/99", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Missing and malformed ids ------------------------------------------------

#[tokio::test]
async fn test_missing_id_returns_404_for_every_verb() {
    let store = MemoryItemStore::new();
    let app = test_app_with(store.clone());

    let get = app
        .clone()
        .oneshot(empty(Method::GET, "/api/items/999"))
        .await
        .unwrap();
    let put = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/items/999",
            json!({"name": "ghost"}),
        ))
        .await
        .unwrap();
    let delete = app
        .oneshot(empty(Method::DELETE, "/api/items/999"))
        .await
        .unwrap();

    for response in [get, put, delete] {
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"message": "Item not found"}));
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_non_integer_id_is_not_found() {
    let response = test_app()
        .oneshot(empty(Method::GET, "/api/items/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"message": "Item not found"}));
}

#[tokio::test]
async fn test_deleted_id_is_never_reissued() {
    let app = test_app();
    app.clone()
        .oneshot(json_request(Method::POST, "/api/items", json!({"name": "A"})))
        .await
        .unwrap();
    app.clone()
        .oneshot(empty(Method::DELETE, "/api/items/1"))
        .await
        .unwrap();
    let response = app
        .oneshot(json_request(Method::POST, "/api/items", json!({"name": "B"})))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["id"], 2);
}

// -- Store failures -----------------------------------------------------------

/// Store whose every call fails with a backend error.
#[derive(Debug)]
struct FailingStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused to db.internal:5432".to_string())
}

#[async_trait]
impl ItemStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        Err(down())
    }
    async fn get_by_id(&self, _id: ItemId) -> Result<Option<Item>, StoreError> {
        Err(down())
    }
    async fn create(&self, _item: NewItem) -> Result<Item, StoreError> {
        Err(down())
    }
    async fn update(&self, _id: ItemId, _patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        Err(down())
    }
    async fn delete(&self, _id: ItemId) -> Result<bool, StoreError> {
        Err(down())
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}

#[tokio::test]
async fn test_store_failure_returns_generic_500() {
    let app = items_api::app(AppState::new(Arc::new(FailingStore)));
    let cases = [
        (empty(Method::GET, "/api/items"), "Error fetching items"),
        (empty(Method::GET, "/api/items/1"), "Error fetching item"),
        (
            json_request(Method::POST, "/api/items", json!({"name": "A"})),
            "Error creating item",
        ),
        (
            json_request(Method::PUT, "/api/items/1", json!({"name": "B"})),
            "Error updating item",
        ),
        (empty(Method::DELETE, "/api/items/1"), "Error deleting item"),
    ];

    for (request, message) in cases {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"message": message})
        );
        assert!(!body.contains("db.internal"));
    }
}

#[tokio::test]
async fn test_validation_runs_before_store() {
    let app = items_api::app(AppState::new(Arc::new(FailingStore)));
    let response = app
        .oneshot(json_request(Method::POST, "/api/items", json!({"name": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
