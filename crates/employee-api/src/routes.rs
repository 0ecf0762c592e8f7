//! HTTP boundary for the employee service.
//!
//! Four resource endpoints over the employee table. Not-found conditions
//! surface as `404` with a fixed `{"detail": "Employee not found"}` body;
//! everything else returns the stored record unchanged.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::{Employee, EmployeeDraft};
use crate::store::SharedStore;

/// Build the service router.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/:id",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

// ── Error responses ───────────────────────────────────────────────────────────

/// Client-visible error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: &'static str,
}

/// Errors surfaced by the HTTP layer.
enum ApiError {
    /// The requested employee id does not exist.
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    detail: "Employee not found",
                }),
            )
                .into_response(),
        }
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn create_employee(
    State(store): State<SharedStore>,
    Json(draft): Json<EmployeeDraft>,
) -> (StatusCode, Json<Employee>) {
    let employee = store.create(draft).await;
    (StatusCode::CREATED, Json(employee))
}

async fn list_employees(State(store): State<SharedStore>) -> Json<Vec<Employee>> {
    Json(store.list().await)
}

async fn get_employee(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<Json<Employee>, ApiError> {
    store.get(id).await.map(Json).ok_or(ApiError::NotFound)
}

async fn update_employee(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
    Json(draft): Json<EmployeeDraft>,
) -> Result<Json<Employee>, ApiError> {
    store
        .update(id, draft)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn delete_employee(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    store
        .delete(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiError::NotFound)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
