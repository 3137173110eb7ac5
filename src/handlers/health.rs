use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::db;
use crate::errors::ServiceError;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness probe that also pings the store.
async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, ServiceError> {
    db::check_connection(&state.db).await?;
    Ok(Json(json!({ "status": "ok", "store": "up" })))
}
