mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use std::time::Duration;

fn server() -> TestServer {
    let state = common::test_state(100, Duration::from_secs(120));
    TestServer::new(common::test_app(state)).unwrap()
}

#[tokio::test]
async fn test_redirect_round_trip() {
    let server = server();

    let shortened = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com/some/page?q=1" }))
        .await;
    shortened.assert_status_ok();
    let slug = shortened.json::<serde_json::Value>()["slug"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/s/{}", slug)).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "https://example.com/some/page?q=1"
    );
}

#[tokio::test]
async fn test_redirect_unknown_slug_is_not_found() {
    let server = server();

    let response = server.get("/s/nosuch").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_redirect_does_not_consume_rate_quota() {
    let state = common::test_state(1, Duration::from_secs(120));
    let server = TestServer::new(common::test_app(state)).unwrap();

    let shortened = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;
    shortened.assert_status_ok();
    let slug = shortened.json::<serde_json::Value>()["slug"]
        .as_str()
        .unwrap()
        .to_string();

    // Quota is spent, but resolution bypasses the counter.
    for _ in 0..5 {
        server
            .get(&format!("/s/{}", slug))
            .await
            .assert_status(StatusCode::TEMPORARY_REDIRECT);
    }
}
