use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use order_broadcast::config::ServiceConfig;
use order_broadcast::execution::ExecutionDelay;
use order_broadcast::lifecycle::OrderSystem;
use order_broadcast::model::{Order, OrderStatus};
use order_broadcast::server::router;
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

fn start(delay: Duration) -> (OrderSystem, Router) {
    let config = ServiceConfig {
        execution_delay: ExecutionDelay::fixed(delay),
        ..ServiceConfig::default()
    };
    let system = OrderSystem::new(&config).unwrap();
    let app = router(system.service.clone());
    (system, app)
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn test_post_returns_pending_order_that_later_executes() {
    let (_system, app) = start(Duration::from_millis(20));

    let (status, body) = call(&app, Method::POST, "/orders").await;
    assert_eq!(status, StatusCode::OK);
    let order: Order = serde_json::from_value(body).unwrap();
    assert_eq!(order.status, OrderStatus::Pending);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let (status, body) = call(&app, Method::GET, &format!("/orders/{}", order.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "EXECUTED");
}

#[tokio::test]
async fn test_delete_confirms_and_removes_the_order() {
    let (_system, app) = start(Duration::from_millis(20));

    let (_, body) = call(&app, Method::POST, "/orders?executeOrder=false").await;
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = call(&app, Method::DELETE, &format!("/orders/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"detail": "Order cancelled"}));

    let (status, body) = call(&app, Method::GET, &format!("/orders/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], format!("Order {} not found", id));
}

#[tokio::test]
async fn test_executed_orders_cannot_be_deleted() {
    let (_system, app) = start(Duration::ZERO);

    let (_, body) = call(&app, Method::POST, "/orders?execute_order=true").await;
    let id = body["id"].as_str().unwrap().to_string();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, body) = call(&app, Method::DELETE, &format!("/orders/{}", id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Cannot cancel non-pending order");
}

#[tokio::test]
async fn test_listing_reports_empty_store_as_not_found() {
    let (_system, app) = start(Duration::from_millis(20));

    let (status, body) = call(&app, Method::GET, "/orders").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Orders are empty");

    call(&app, Method::POST, "/orders?executeOrder=false").await;
    call(&app, Method::POST, "/orders?executeOrder=false").await;
    let (status, body) = call(&app, Method::GET, "/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let (_system, app) = start(Duration::from_millis(20));

    let (status, _) = call(&app, Method::GET, "/orders/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let missing = uuid::Uuid::new_v4();
    let (status, body) = call(&app, Method::DELETE, &format!("/orders/{}", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], format!("Order {} not found", missing));
}

#[tokio::test]
async fn test_index_serves_the_live_page() {
    let (_system, app) = start(Duration::from_millis(20));

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/ws"));
}
