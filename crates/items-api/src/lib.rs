//! # items-api: Items CRUD Service
//!
//! An Axum HTTP service exposing create/read/update/delete over a single
//! table of items (`id`, `name`, optional `description`).
//!
//! ## Architecture
//!
//! - Route handlers in [`routes`] do request mapping only; persistence goes
//!   through the [`store::ItemStore`] trait held in [`state::AppState`].
//! - Two store implementations: [`db::items::PgItemStore`] over a Postgres
//!   pool and [`store::MemoryItemStore`] for tests and database-less runs.
//! - Errors map to HTTP status codes via [`error::AppError`].
//!
//! ## Middleware Stack (outermost first)
//!
//! TraceLayer → CORS → body limit → Metrics (per route) → Handler

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod item;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod store;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ErrorBody;
use crate::state::AppState;

/// Request bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the complete application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let mut router = Router::new()
        .route("/", get(root))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(routes::items::router())
        .merge(openapi::router());

    if state.metrics.is_some() {
        router = router.route("/metrics", get(prometheus_metrics));
    }

    router
        .route_layer(axum::middleware::from_fn(middleware::metrics::track_metrics))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "Items API is running!"
}

/// Liveness probe: the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the store answers a round trip.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "store unavailable")
        }
    }
}

async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Not found".to_string(),
        }),
    )
}
