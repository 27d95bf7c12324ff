mod common;

use axum_test::TestServer;
use std::time::Duration;

#[tokio::test]
async fn test_health_reports_healthy() {
    let state = common::test_state(15, Duration::from_secs(120));
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["store"]["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
