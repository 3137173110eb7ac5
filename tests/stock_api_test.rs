mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{json_with_status, TestApp};

async fn seed_item(app: &TestApp, name: &str, quantity: &str, category: &str, size: &str) {
    let response = app
        .post_form(
            "/stock/add",
            &json!({
                "name": name,
                "quantity": quantity,
                "category": category,
                "size": size,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn stock_page_groups_items_by_family() {
    let app = TestApp::new().await;

    seed_item(&app, "blouse", "10", "ocp uniforms", "m").await;
    seed_item(&app, "shorts", "25", "pt uniforms", "s").await;
    seed_item(&app, "jackets", "5", "blue uniforms", "l").await;

    let body = json_with_status(app.get("/stock").await, StatusCode::OK).await;
    assert_eq!(body["ocp_uniforms"].as_array().unwrap().len(), 1);
    assert_eq!(body["pt_uniforms"].as_array().unwrap().len(), 1);
    assert_eq!(body["blue_uniforms"].as_array().unwrap().len(), 1);
    assert!(body["flight_suits"].as_array().unwrap().is_empty());
    assert_eq!(body["ocp_uniforms"][0]["name"], "blouse");
    assert_eq!(body["ocp_uniforms"][0]["quantity"], 10);
}

#[tokio::test]
async fn stock_add_requires_known_family_and_size() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/stock/add",
            &json!({
                "name": "blouse",
                "quantity": "10",
                "category": "dress uniforms",
                "size": "m",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_form(
            "/stock/add",
            &json!({
                "name": "blouse",
                "quantity": "10",
                "category": "ocp uniforms",
                "size": "xxl",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_with_status(app.get("/stock").await, StatusCode::OK).await;
    assert!(body["ocp_uniforms"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn stock_update_overwrites_quantity() {
    let app = TestApp::new().await;
    seed_item(&app, "boots", "8", "ocp uniforms", "l").await;

    let body = json_with_status(app.get("/stock").await, StatusCode::OK).await;
    let id = body["ocp_uniforms"][0]["id"].as_str().expect("item id").to_string();

    let response = app
        .post_form(
            &format!("/stock/ocp%20uniforms/update/{id}"),
            &json!({ "quantity": "3" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_with_status(app.get("/stock").await, StatusCode::OK).await;
    assert_eq!(body["ocp_uniforms"][0]["quantity"], 3);
}

#[tokio::test]
async fn stock_update_unknown_id_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/stock/pt%20uniforms/update/no-such-id",
            &json!({ "quantity": "3" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stock_routes_reject_unknown_family_in_path() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/stock/space%20suits/update/some-id",
            &json!({ "quantity": "3" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stock_delete_removes_item() {
    let app = TestApp::new().await;
    seed_item(&app, "caps", "4", "flight suits", "m").await;

    let body = json_with_status(app.get("/stock").await, StatusCode::OK).await;
    let id = body["flight_suits"][0]["id"].as_str().expect("item id").to_string();

    let response = app
        .post_empty(&format!("/stock/flight%20suits/delete/{id}"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_with_status(app.get("/stock").await, StatusCode::OK).await;
    assert!(body["flight_suits"].as_array().unwrap().is_empty());

    let response = app
        .post_empty(&format!("/stock/flight%20suits/delete/{id}"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
