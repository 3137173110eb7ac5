use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::entities::stock_item;
use crate::errors::ServiceError;
use crate::handlers::parse_quantity;
use crate::services::stock::NewStockItem;
use crate::taxonomy::{self, StockCategory};
use crate::AppState;

/// Data backing the stock page: one list per uniform family. The personnel
/// ledger is tracked separately and never reconciled against these counts.
#[derive(Debug, Serialize)]
pub struct StockPage {
    pub blue_uniforms: Vec<stock_item::Model>,
    pub ocp_uniforms: Vec<stock_item::Model>,
    pub flight_suits: Vec<stock_item::Model>,
    pub pt_uniforms: Vec<stock_item::Model>,
}

#[derive(Debug, Deserialize)]
pub struct AddStockForm {
    pub name: String,
    pub quantity: String,
    pub category: String,
    pub size: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockForm {
    pub quantity: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stock", get(stock_page))
        .route("/stock/add", post(add_stock_item))
        .route("/stock/{category}/update/{id}", post(update_stock_item))
        .route("/stock/{category}/delete/{id}", post(delete_stock_item))
}

async fn stock_page(State(state): State<AppState>) -> Result<Json<StockPage>, ServiceError> {
    let stock = &state.services.stock;
    Ok(Json(StockPage {
        blue_uniforms: stock.list_by_category(StockCategory::BlueUniforms).await?,
        ocp_uniforms: stock.list_by_category(StockCategory::OcpUniforms).await?,
        flight_suits: stock.list_by_category(StockCategory::FlightSuits).await?,
        pt_uniforms: stock.list_by_category(StockCategory::PtUniforms).await?,
    }))
}

async fn add_stock_item(
    State(state): State<AppState>,
    Form(form): Form<AddStockForm>,
) -> Result<Redirect, ServiceError> {
    let item = NewStockItem {
        name: form.name,
        quantity: parse_quantity(&form.quantity)?,
        category: form.category,
        size: form.size,
    };
    state.services.stock.create(item).await?;
    Ok(Redirect::to("/stock"))
}

async fn update_stock_item(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
    Form(form): Form<UpdateStockForm>,
) -> Result<Redirect, ServiceError> {
    // The path carries the family for page anchoring; reject garbage early.
    taxonomy::parse_stock_category(&category)?;
    let quantity = parse_quantity(&form.quantity)?;
    state.services.stock.update_quantity(&id, quantity).await?;
    Ok(Redirect::to("/stock"))
}

async fn delete_stock_item(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Redirect, ServiceError> {
    taxonomy::parse_stock_category(&category)?;
    state.services.stock.delete(&id).await?;
    Ok(Redirect::to("/stock"))
}
