pub mod customer;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::backend::CustomerBackend;
use crate::error::AppResult;

/// Shared handler state
pub type AppState = Arc<dyn CustomerBackend>;

pub async fn health(State(backend): State<AppState>) -> AppResult<(StatusCode, Json<Value>)> {
    backend.health_check().await?;
    Ok((StatusCode::OK, Json(json!({ "status": "ok" }))))
}
