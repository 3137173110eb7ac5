use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::ledger_item;
use crate::errors::ServiceError;
use crate::services::ledger::LedgerKey;
use crate::AppState;

/// JSON body for ledger mutations. `quantity` is the delta to apply.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LedgerMutation {
    pub name: String,
    pub category: String,
    pub size: Option<String>,
    pub quantity: i32,
}

/// Ledger row as returned to API callers. An unsized row reports `size`
/// as null rather than the empty-string storage sentinel.
#[derive(Debug, Serialize, ToSchema)]
pub struct LedgerItemDto {
    pub id: String,
    pub name: String,
    pub category: String,
    pub size: Option<String>,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ledger_item::Model> for LedgerItemDto {
    fn from(model: ledger_item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            size: (!model.size.is_empty()).then_some(model.size),
            quantity: model.quantity,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(list_ledger))
        .route("/inventory/add", post(add_to_ledger))
        .route("/inventory/remove", post(remove_from_ledger))
}

/// Every ledger row, unfiltered.
#[utoipa::path(
    get,
    path = "/inventory",
    responses(
        (status = 200, description = "All ledger items", body = [LedgerItemDto]),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "ledger"
)]
pub async fn list_ledger(
    State(state): State<AppState>,
) -> Result<Json<Vec<LedgerItemDto>>, ServiceError> {
    let items = state.services.ledger.list_all().await?;
    Ok(Json(items.into_iter().map(LedgerItemDto::from).collect()))
}

/// Adds quantity to the matching item, creating it on first sight.
#[utoipa::path(
    post,
    path = "/inventory/add",
    request_body = LedgerMutation,
    responses(
        (status = 200, description = "Item after the increment", body = LedgerItemDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "ledger"
)]
pub async fn add_to_ledger(
    State(state): State<AppState>,
    Json(body): Json<LedgerMutation>,
) -> Result<Json<LedgerItemDto>, ServiceError> {
    let key = LedgerKey::parse(&body.name, &body.category, body.size.as_deref())?;
    let item = state
        .services
        .ledger
        .add_or_increment(key, body.quantity)
        .await?;
    Ok(Json(item.into()))
}

/// Removes quantity from the matching item; the count never goes negative.
#[utoipa::path(
    post,
    path = "/inventory/remove",
    request_body = LedgerMutation,
    responses(
        (status = 200, description = "Item after the decrement", body = LedgerItemDto),
        (status = 400, description = "Invalid input or insufficient quantity", body = crate::errors::ErrorResponse),
        (status = 404, description = "No matching item", body = crate::errors::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "ledger"
)]
pub async fn remove_from_ledger(
    State(state): State<AppState>,
    Json(body): Json<LedgerMutation>,
) -> Result<Json<LedgerItemDto>, ServiceError> {
    let key = LedgerKey::parse(&body.name, &body.category, body.size.as_deref())?;
    let item = state.services.ledger.decrement(key, body.quantity).await?;
    Ok(Json(item.into()))
}
