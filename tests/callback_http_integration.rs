//! HTTP integration tests for the gateway router.
//!
//! Drives the real Axum router with in-memory adapters, exercising checkout
//! initiation and callback reconciliation end to end.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rust_decimal_macros::dec;
use tower::ServiceExt;

use ccpay_gateway::adapters::http::{gateway_router, GatewayAppState};
use ccpay_gateway::adapters::logging::{LoggingCompletionObserver, TracingNoticeSink};
use ccpay_gateway::adapters::memory::InMemoryOrderStore;
use ccpay_gateway::adapters::paycard::MockProcessorClient;
use ccpay_gateway::application::handlers::OrderLockRegistry;
use ccpay_gateway::config::GatewayConfig;
use ccpay_gateway::domain::foundation::OrderId;
use ccpay_gateway::domain::order::{Order, OrderStatus, META_TRANSACTION_REFERENCE};

fn gateway_config() -> GatewayConfig {
    GatewayConfig {
        merchant_code: "SHOP-42".to_string(),
        epay_url: "https://paycard.co/epay/create/".to_string(),
        callback_url: "https://shop.example.com/api/callbacks/paycard".to_string(),
        checkout_url: "https://shop.example.com/checkout".to_string(),
        order_received_url: "https://shop.example.com/order-received".to_string(),
        site_name: "Ma Boutique".to_string(),
        enabled: true,
        skip_to_processor: false,
        processor_timeout_secs: 20,
    }
}

struct TestApp {
    store: Arc<InMemoryOrderStore>,
    app: Router,
}

fn test_app() -> TestApp {
    let store = Arc::new(InMemoryOrderStore::new());
    let state = GatewayAppState {
        order_store: store.clone(),
        processor_client: Arc::new(MockProcessorClient::default()),
        notice_sink: Arc::new(TracingNoticeSink),
        completion_observer: Arc::new(LoggingCompletionObserver),
        order_locks: Arc::new(OrderLockRegistry::new()),
        gateway_config: gateway_config(),
    };
    let app = Router::new().nest("/api", gateway_router()).with_state(state);
    TestApp { store, app }
}

fn seed_pending_order(store: &InMemoryOrderStore, id: &str) {
    store.insert(Order::pending(
        OrderId::new(id).unwrap(),
        id,
        dec!(10000),
        "ccpay",
    ));
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn valid_get_callback_completes_and_redirects_to_order_received() {
    let TestApp { store, app } = test_app();
    seed_pending_order(&store, "1042");

    let uri = "/api/callbacks/paycard?order_id=1042&transactionReference=TXN-001&montant=10000&c=SHOP-42&paycardPaymentMethod=orange_money";
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "https://shop.example.com/order-received/1042"
    );

    let order = store.snapshot(&OrderId::new("1042").unwrap()).unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(
        order.metadata.get(META_TRANSACTION_REFERENCE),
        Some(&"TXN-001".to_string())
    );
}

#[tokio::test]
async fn post_form_callback_is_accepted() {
    let TestApp { store, app } = test_app();
    seed_pending_order(&store, "1042");

    let body = "order_id=1042&transactionReference=TXN-002&montant=10000&c=SHOP-42";
    let request = Request::post("/api/callbacks/paycard")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "https://shop.example.com/order-received/1042"
    );
    let order = store.snapshot(&OrderId::new("1042").unwrap()).unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
}

#[tokio::test]
async fn incomplete_callback_redirects_to_checkout_without_touching_the_order() {
    let TestApp { store, app } = test_app();
    seed_pending_order(&store, "1042");

    // montant missing
    let uri = "/api/callbacks/paycard?order_id=1042&transactionReference=TXN-001&c=SHOP-42";
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "https://shop.example.com/checkout");

    let order = store.snapshot(&OrderId::new("1042").unwrap()).unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn mismatched_amount_parks_the_order_on_hold() {
    let TestApp { store, app } = test_app();
    seed_pending_order(&store, "1042");

    let uri = "/api/callbacks/paycard?order_id=1042&transactionReference=TXN-001&montant=9000&c=SHOP-42";
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    // The payment could not be verified, so the shopper returns to checkout
    assert_eq!(location(&response), "https://shop.example.com/checkout");

    let order = store.snapshot(&OrderId::new("1042").unwrap()).unwrap();
    assert_eq!(order.status, OrderStatus::OnHold);
    assert!(order.notes[0].body.contains("9000"));
    assert!(order.notes[0].body.contains("10000"));
}

#[tokio::test]
async fn checkout_returns_payment_url_for_pending_order() {
    let TestApp { store, app } = test_app();
    seed_pending_order(&store, "1042");

    let request = Request::post("/api/payments/checkout")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"order_id":"1042"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["redirect_url"], "https://paycard.test/pay/mock");
}

#[tokio::test]
async fn checkout_for_unknown_order_is_404() {
    let TestApp { app, .. } = test_app();

    let request = Request::post("/api/payments/checkout")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"order_id":"9999"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error_code"], "ORDER_NOT_FOUND");
}

#[tokio::test]
async fn duplicate_callback_leaves_completed_order_untouched() {
    let TestApp { store, app } = test_app();
    seed_pending_order(&store, "1042");

    let uri = "/api/callbacks/paycard?order_id=1042&transactionReference=TXN-001&montant=10000&c=SHOP-42";
    let first = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let second = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
    // The order is already completed; the duplicate goes back to checkout
    assert_eq!(location(&second), "https://shop.example.com/checkout");

    let order = store.snapshot(&OrderId::new("1042").unwrap()).unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    // Only the original completion note is present
    assert_eq!(order.notes.len(), 1);
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let TestApp { app, .. } = test_app();

    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
