//! Request handlers for the todo API

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::errors::{Result, TodoApiError};
use crate::model::{
    MessageResponse, Todo, TodoCreatedResponse, TodoDocument, TodoInput, TodoListResponse,
};
use crate::storage::{StoreError, TodoStore};

/// Home page - GET /
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../../static/home.html"))
}

/// Health check endpoint
#[instrument]
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Prometheus metrics endpoint
#[instrument]
pub async fn metrics() -> impl IntoResponse {
    use crate::metrics::REGISTRY;
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Trim and parse a path id, rejecting anything that is not a valid hex
/// object id before storage is touched
fn parse_id(raw: &str) -> Result<ObjectId> {
    let trimmed = raw.trim();
    ObjectId::parse_str(trimmed).map_err(|_| TodoApiError::InvalidId(trimmed.to_string()))
}

/// Surface a store failure as an API error, logging backend errors only;
/// absence is normal flow and handled by the status mapping
fn store_failure(operation: &str, err: StoreError) -> TodoApiError {
    if matches!(err, StoreError::Backend(_)) {
        error!(error = %err, operation, "Storage operation failed");
    }
    TodoApiError::from(err)
}

/// List todos - GET /todo/
#[instrument(skip(store))]
pub async fn list_todos(State(store): State<Arc<dyn TodoStore>>) -> Result<Response> {
    let docs = store
        .find_all()
        .await
        .map_err(|e| store_failure("find", e))?;

    let data: Vec<Todo> = docs.into_iter().map(Todo::from).collect();

    Ok((StatusCode::OK, Json(TodoListResponse { data })).into_response())
}

/// Create todo - POST /todo/
#[instrument(skip(store, payload))]
pub async fn create_todo(
    State(store): State<Arc<dyn TodoStore>>,
    payload: std::result::Result<Json<TodoInput>, JsonRejection>,
) -> Result<Response> {
    let Json(input) = payload.map_err(|e| TodoApiError::MalformedBody(e.body_text()))?;

    if input.title.is_empty() {
        return Err(TodoApiError::EmptyTitle);
    }

    // completed is ignored on create; new items always start incomplete
    let doc = TodoDocument {
        id: ObjectId::new(),
        title: input.title,
        completed: false,
        created_at: bson::DateTime::now(),
    };

    info!(todo_id = %doc.id, "Creating todo");

    store
        .insert(&doc)
        .await
        .map_err(|e| store_failure("insert", e))?;

    let response = (
        StatusCode::CREATED,
        Json(TodoCreatedResponse {
            message: "Todo created successfully".to_string(),
            todo_id: doc.id.to_hex(),
        }),
    )
        .into_response();

    Ok(response)
}

/// Update todo - PUT /todo/{id}
#[instrument(skip(store, payload))]
pub async fn update_todo(
    State(store): State<Arc<dyn TodoStore>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<TodoInput>, JsonRejection>,
) -> Result<Response> {
    // id syntax is checked before the body is looked at
    let id = parse_id(&id)?;

    let Json(input) = payload.map_err(|e| TodoApiError::MalformedBody(e.body_text()))?;

    if input.title.is_empty() {
        return Err(TodoApiError::EmptyTitle);
    }

    info!(todo_id = %id, completed = input.completed, "Updating todo");

    store
        .update(id, &input.title, input.completed)
        .await
        .map_err(|e| store_failure("update", e))?;

    let response = (
        StatusCode::OK,
        Json(MessageResponse {
            message: "Todo updated successfully".to_string(),
        }),
    )
        .into_response();

    Ok(response)
}

/// Delete todo - DELETE /todo/{id}
#[instrument(skip(store))]
pub async fn delete_todo(
    State(store): State<Arc<dyn TodoStore>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&id)?;

    info!(todo_id = %id, "Deleting todo");

    store
        .delete(id)
        .await
        .map_err(|e| store_failure("delete", e))?;

    let response = (
        StatusCode::OK,
        Json(MessageResponse {
            message: "Todo deleted successfully".to_string(),
        }),
    )
        .into_response();

    Ok(response)
}
