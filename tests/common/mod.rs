// Shared across the integration test binaries; not every binary uses every
// helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;

use supply_room_api::{config::AppConfig, db, handlers::AppServices, AppState};

/// Harness for spinning up an application backed by an in-memory SQLite
/// database. One pooled connection keeps every request on the same
/// in-memory store.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new("sqlite::memory:", "127.0.0.1", 18_080, "test");
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let services = AppServices::new(db_arc.clone(), cfg.store_op_timeout());
        let state = AppState {
            db: db_arc,
            config: cfg,
            services,
        };

        let router = supply_room_api::app(state.clone());

        Self { router, state }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(body::Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    /// POST a JSON body, as the ledger endpoints expect.
    pub async fn post_json(&self, uri: &str, json: Value) -> Response {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body::Body::from(
                    serde_json::to_vec(&json).expect("failed to serialize json request body"),
                ))
                .expect("failed to build request"),
        )
        .await
    }

    /// POST a urlencoded form, as the page flows expect.
    pub async fn post_form<T: Serialize>(&self, uri: &str, form: &T) -> Response {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(body::Body::from(
                    serde_urlencoded::to_string(form).expect("failed to serialize form body"),
                ))
                .expect("failed to build request"),
        )
        .await
    }

    /// POST with an empty body, for the delete endpoints.
    pub async fn post_empty(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .body(body::Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    async fn send(&self, request: Request<body::Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// Fetch a JSON body and assert the expected status in one step.
pub async fn json_with_status(response: Response, expected: StatusCode) -> Value {
    assert_eq!(response.status(), expected);
    response_json(response).await
}
