mod common;

use axum::http::StatusCode;
use rstest::rstest;
use serde_json::json;

use common::{json_with_status, TestApp};

#[tokio::test]
async fn pt_uniform_issue_round_trip() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/pt-uniforms/add",
            &json!({
                "name": "Doe",
                "quantity": "2",
                "category": "pt shorts",
                "size": "m",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_with_status(app.get("/pt-uniforms").await, StatusCode::OK).await;
    assert_eq!(body["title"], "PT Uniforms");
    let records = body["records"].as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Doe");
    assert_eq!(records[0]["quantity"], 2);
    assert_eq!(records[0]["category"], "pt shorts");
    assert_eq!(records[0]["size"], "m");
    assert_eq!(records[0]["ranks"], serde_json::Value::Null);
}

#[tokio::test]
async fn ocp_issue_records_rank() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/inventory/ocp/add",
            &json!({
                "name": "Smith",
                "quantity": "1",
                "category": "ocp boots",
                "size": "l",
                "ranks": "SrA",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_with_status(app.get("/inventory/ocp").await, StatusCode::OK).await;
    let records = body["records"].as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["category"], "ocp boots");
    assert_eq!(records[0]["ranks"], "SrA");
}

#[tokio::test]
async fn blues_issue_records_ribbons() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/inventory/blues/add",
            &json!({
                "name": "Reyes",
                "quantity": "1",
                "category": "blue jackets",
                "size": "s",
                "ranks": "A1C",
                "ribbons": "4",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_with_status(app.get("/blues").await, StatusCode::OK).await;
    let records = body["records"].as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["ribbons"], 4);
}

#[tokio::test]
async fn category_outside_group_is_rejected_and_not_persisted() {
    let app = TestApp::new().await;

    // A real category, but one that belongs to the OCP group.
    let response = app
        .post_form(
            "/pt-uniforms/add",
            &json!({
                "name": "Doe",
                "quantity": "1",
                "category": "ocp boots",
                "size": "m",
            }),
        )
        .await;
    let body = json_with_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("not accepted by the pt endpoint"));

    let body = json_with_status(app.get("/pt-uniforms").await, StatusCode::OK).await;
    assert!(body["records"].as_array().expect("records array").is_empty());
}

#[tokio::test]
async fn unknown_category_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/pt-uniforms/add",
            &json!({
                "name": "Doe",
                "quantity": "1",
                "category": "parade armor",
                "size": "m",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_quantity_is_a_validation_failure() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/pt-uniforms/add",
            &json!({
                "name": "Doe",
                "quantity": "many",
                "category": "pt shorts",
                "size": "m",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn legacy_alias_normalizes_to_canonical_category() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/pt-uniforms/add",
            &json!({
                "name": "Doe",
                "quantity": "1",
                "category": "shorts",
                "size": "small",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_with_status(app.get("/pt-uniforms").await, StatusCode::OK).await;
    let records = body["records"].as_array().expect("records array");
    assert_eq!(records[0]["category"], "pt shorts");
    assert_eq!(records[0]["size"], "s");
}

#[tokio::test]
async fn delete_removes_record_and_second_delete_is_not_found() {
    let app = TestApp::new().await;

    app.post_form(
        "/cadets/add",
        &json!({
            "name": "Okafor",
            "quantity": "1",
            "category": "cadets names",
        }),
    )
    .await;

    let body = json_with_status(app.get("/cadets").await, StatusCode::OK).await;
    let id = body["records"][0]["id"].as_str().expect("record id").to_string();

    let response = app.post_empty(&format!("/cadets/delete/{id}")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_with_status(app.get("/cadets").await, StatusCode::OK).await;
    assert!(body["records"].as_array().expect("records array").is_empty());

    let response = app.post_empty(&format!("/cadets/delete/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn group_lists_do_not_leak_across_groups() {
    let app = TestApp::new().await;

    app.post_form(
        "/pt-uniforms/add",
        &json!({
            "name": "Doe",
            "quantity": "1",
            "category": "pt shirt",
            "size": "m",
        }),
    )
    .await;
    app.post_form(
        "/flight/add",
        &json!({
            "name": "Vang",
            "quantity": "1",
            "category": "flight suit",
            "size": "l",
        }),
    )
    .await;

    let pt = json_with_status(app.get("/pt-uniforms").await, StatusCode::OK).await;
    assert_eq!(pt["records"].as_array().unwrap().len(), 1);
    assert_eq!(pt["records"][0]["name"], "Doe");

    let flight = json_with_status(app.get("/flight-suits").await, StatusCode::OK).await;
    assert_eq!(flight["records"].as_array().unwrap().len(), 1);
    assert_eq!(flight["records"][0]["name"], "Vang");
}

#[rstest]
#[case("/pt-uniforms", "PT Uniforms")]
#[case("/inventory/ocp", "OCP Uniforms")]
#[case("/blues", "Blue Uniforms")]
#[case("/flight-suits", "Flight Suits")]
#[case("/cadets", "Cadets Names")]
#[tokio::test]
async fn empty_group_lists_succeed(#[case] path: &str, #[case] title: &str) {
    let app = TestApp::new().await;

    let body = json_with_status(app.get(path).await, StatusCode::OK).await;
    assert_eq!(body["title"], title);
    assert!(body["records"].as_array().expect("records array").is_empty());
}

#[tokio::test]
async fn search_matches_name_case_insensitively() {
    let app = TestApp::new().await;

    app.post_form(
        "/pt-uniforms/add",
        &json!({
            "name": "MacArthur",
            "quantity": "1",
            "category": "pt pants",
            "size": "xl",
        }),
    )
    .await;
    app.post_form(
        "/pt-uniforms/add",
        &json!({
            "name": "Doe",
            "quantity": "1",
            "category": "pt pants",
            "size": "m",
        }),
    )
    .await;

    let body = json_with_status(app.get("/inventory/search?name=macart").await, StatusCode::OK).await;
    let records = body.as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "MacArthur");
}

#[tokio::test]
async fn search_without_name_is_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/inventory/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/inventory/search?name=%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
