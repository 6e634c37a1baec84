//! Integration tests for the waiting-room HTTP API.

mod helpers;

use axum::http::{StatusCode, header};

#[tokio::test]
async fn test_sale_flow_register_promote_and_rank() {
    let app = helpers::TestApp::new();

    assert_eq!(app.register("sale", 1).await, 1);
    app.clock.advance(1);
    assert_eq!(app.register("sale", 2).await, 2);
    app.clock.advance(10);

    let resp = app.request("POST", "/api/v1/queue/allow?queue=sale&count=1").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["requested_count"], 1);
    assert_eq!(resp.body["allowed_count"], 1);

    let resp = app.request("GET", "/api/v1/queue/rank?queue=sale&user_id=2").await;
    assert_eq!(resp.body["rank"], 1);

    let resp = app.request("GET", "/api/v1/queue/rank?queue=sale&user_id=1").await;
    assert_eq!(resp.body["rank"], -1);

    assert!(app.admission.is_admitted("sale", "1").await.unwrap());
    assert!(!app.admission.is_admitted("sale", "2").await.unwrap());
}

#[tokio::test]
async fn test_allow_more_than_waiting_reports_actual_count() {
    let app = helpers::TestApp::new();
    for user in 0..5 {
        app.register("drop", user).await;
        app.clock.advance(1);
    }

    let resp = app.request("POST", "/api/v1/queue/allow?queue=drop&count=3").await;
    assert_eq!(resp.body["allowed_count"], 3);

    let resp = app.request("POST", "/api/v1/queue/allow?queue=drop&count=3").await;
    assert_eq!(resp.body["requested_count"], 3);
    assert_eq!(resp.body["allowed_count"], 2);

    let resp = app.request("POST", "/api/v1/queue/allow?queue=drop&count=3").await;
    assert_eq!(resp.body["allowed_count"], 0);
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let app = helpers::TestApp::new();
    app.register("sale", 100).await;

    let resp = app.request("POST", "/api/v1/queue?queue=sale&user_id=100").await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(resp.body["error"], "ALREADY_REGISTERED");
    assert_eq!(app.admission.waiting_count("sale").await.unwrap(), 1);
}

#[tokio::test]
async fn test_queues_are_isolated() {
    let app = helpers::TestApp::new();
    assert_eq!(app.register("a", 1).await, 1);
    assert_eq!(app.register("b", 1).await, 1);
    assert_eq!(app.register("b", 2).await, 2);

    let resp = app.request("POST", "/api/v1/queue/allow?queue=b&count=10").await;
    assert_eq!(resp.body["allowed_count"], 2);

    let resp = app.request("GET", "/api/v1/queue/rank?queue=a&user_id=1").await;
    assert_eq!(resp.body["rank"], 1);
}

#[tokio::test]
async fn test_default_queue_is_used_when_omitted() {
    let app = helpers::TestApp::new();
    let resp = app.request("POST", "/api/v1/queue?user_id=100").await;
    assert_eq!(resp.body["rank"], 1);
    assert_eq!(app.admission.waiting_count("default").await.unwrap(), 1);
}

#[tokio::test]
async fn test_touch_returns_token_and_sets_cookie() {
    let app = helpers::TestApp::new();
    let resp = app.request("GET", "/api/v1/queue/touch?queue=default&user_id=100").await;
    assert_eq!(resp.status, StatusCode::OK);

    let token = "d333a5d4eb24f3f5cdd767d79b8c01aad3cd73d3537c70dec430455d37afe4b8";
    assert_eq!(resp.text, token);

    let cookie = resp
        .headers
        .get(header::SET_COOKIE)
        .expect("cookie missing")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with(&format!("user-queue-default-token={token}")));
    assert!(cookie.contains("Max-Age=300"));
    assert!(cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_allowed_checks_token_only() {
    let app = helpers::TestApp::new();
    let token = app
        .request("GET", "/api/v1/queue/touch?queue=sale&user_id=9")
        .await
        .text;

    // Never registered or promoted, yet the matching token is accepted.
    let resp = app
        .request(
            "GET",
            &format!("/api/v1/queue/allowed?queue=sale&user_id=9&token={token}"),
        )
        .await;
    assert_eq!(resp.body["allowed"], true);

    let resp = app
        .request(
            "GET",
            &format!("/api/v1/queue/allowed?queue=sale&user_id=8&token={token}"),
        )
        .await;
    assert_eq!(resp.body["allowed"], false);

    let resp = app
        .request(
            "GET",
            &format!("/api/v1/queue/allowed?queue=other&user_id=9&token={token}"),
        )
        .await;
    assert_eq!(resp.body["allowed"], false);
}

#[tokio::test]
async fn test_invalid_parameters_are_bad_request() {
    let app = helpers::TestApp::new();

    let resp = app.request("GET", "/api/v1/queue/rank?queue=sale&user_id=abc").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = app.request("POST", "/api/v1/queue/allow?queue=sale&count=-1").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let long = "q".repeat(300);
    let resp = app
        .request("POST", &format!("/api/v1/queue?queue={long}&user_id=1"))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_custom_token_prefix_changes_token() {
    let mut config = xflow_core::config::AppConfig::default();
    config.token.prefix = "shop-".to_string();
    let app = helpers::TestApp::with_config(config);

    let custom = app.request("GET", "/api/v1/queue/touch?queue=sale&user_id=1").await.text;
    assert_ne!(
        custom,
        "769133492f21d7b78dd3bb7a7a8609876f069c1994006c94c87129e154629729"
    );
    assert_eq!(custom.len(), 64);
}
