use barbershop_backend::mock::MockBackend;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::server;

#[tokio::test]
async fn test_health_check() {
    let server = server(MockBackend::new());

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_version() {
    let server = server(MockBackend::new());

    let body = server.get("/version").await.json::<Value>();

    assert_eq!(body["name"], "barbershop-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
