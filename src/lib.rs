//! Supply Room API Library
//!
//! Inventory service for a unit supply room: personnel-issued uniform items
//! grouped by category, aggregate stock counts per uniform family, and an
//! additive quantity ledger.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod request_id;
pub mod services;
pub mod taxonomy;

use std::sync::Arc;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Shared application state. The store handle is acquired once at startup
/// and passed down explicitly.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

/// List-view payload handed to the template renderer: a page title plus the
/// records to show.
#[derive(Debug, Serialize)]
pub struct ListPage<T> {
    pub title: String,
    pub records: Vec<T>,
}

/// All application routes, without layers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::personnel::routes())
        .merge(handlers::stock::routes())
        .merge(handlers::ledger::routes())
        .merge(handlers::health::routes())
}

/// The complete application: routes, docs, and the middleware stack.
pub fn app(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout();
    Router::new()
        .route("/", get(|| async { "supply-room-api up" }))
        .merge(routes())
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(axum::middleware::from_fn(
            middleware_helpers::security_headers::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
