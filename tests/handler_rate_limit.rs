mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_quota_enforced_per_client() {
    let state = common::test_state(3, Duration::from_secs(120));
    let server = TestServer::new(common::test_app(state)).unwrap();

    for i in 0..3 {
        let response = server
            .post("/shorten")
            .json(&json!({ "long_url": format!("https://example.com/{}", i) }))
            .await;
        response.assert_status_ok();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["limit_remaining"], 3 - (i as i64 + 1));
    }

    let denied = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com/over" }))
        .await;

    denied.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body = denied.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "rate_limited");
    assert_eq!(body["error"]["details"]["limit_remaining"], 0);
}

#[tokio::test]
async fn test_denied_requests_do_not_consume_quota() {
    let state = common::test_state(1, Duration::from_secs(120));
    let server = TestServer::new(common::test_app(state)).unwrap();

    server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com" }))
        .await
        .assert_status_ok();

    // Repeated denials keep reporting the same exhausted window.
    for _ in 0..3 {
        let denied = server
            .post("/shorten")
            .json(&json!({ "long_url": "https://example.com/other" }))
            .await;
        denied.assert_status(StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            denied.json::<serde_json::Value>()["error"]["details"]["limit_remaining"],
            0
        );
    }
}

#[tokio::test]
async fn test_rejected_url_still_consumes_admission() {
    // Admission is checked before URL validation, mirroring the request
    // flow: a client spamming bad URLs still burns its quota.
    let state = common::test_state(2, Duration::from_secs(120));
    let server = TestServer::new(common::test_app(state)).unwrap();

    for _ in 0..2 {
        server
            .post("/shorten")
            .json(&json!({ "long_url": "http://not-https.example" }))
            .await
            .assert_status_bad_request();
    }

    let denied = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com" }))
        .await;
    denied.assert_status(StatusCode::TOO_MANY_REQUESTS);
}
