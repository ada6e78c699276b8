//! Axum router configuration for the gateway endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_checkout, handle_callback_get, handle_callback_post, health, GatewayAppState,
};

/// Create the payment initiation router.
///
/// # Routes
/// - `POST /checkout` - Open a hosted payment session for an order
pub fn payment_routes() -> Router<GatewayAppState> {
    Router::new().route("/checkout", post(create_checkout))
}

/// Create the processor callback router.
///
/// Callbacks carry no authentication; the reconciler validates the payload
/// against the stored order. The processor may call with GET (query string)
/// or POST (form body).
///
/// # Routes
/// - `GET /paycard` - Processor callback via query string
/// - `POST /paycard` - Processor callback via form body
pub fn callback_routes() -> Router<GatewayAppState> {
    Router::new().route(
        "/paycard",
        get(handle_callback_get).post(handle_callback_post),
    )
}

/// Create the complete gateway router, suitable for mounting at `/api`.
pub fn gateway_router() -> Router<GatewayAppState> {
    Router::new()
        .nest("/payments", payment_routes())
        .nest("/callbacks", callback_routes())
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::logging::{LoggingCompletionObserver, TracingNoticeSink};
    use crate::adapters::memory::InMemoryOrderStore;
    use crate::adapters::paycard::MockProcessorClient;
    use crate::application::handlers::OrderLockRegistry;
    use crate::config::GatewayConfig;

    fn test_state() -> GatewayAppState {
        GatewayAppState {
            order_store: Arc::new(InMemoryOrderStore::new()),
            processor_client: Arc::new(MockProcessorClient::default()),
            notice_sink: Arc::new(TracingNoticeSink),
            completion_observer: Arc::new(LoggingCompletionObserver),
            order_locks: Arc::new(OrderLockRegistry::new()),
            gateway_config: GatewayConfig {
                merchant_code: "SHOP-42".to_string(),
                epay_url: "https://paycard.co/epay/create/".to_string(),
                callback_url: "https://shop.example.com/api/callbacks/paycard".to_string(),
                checkout_url: "https://shop.example.com/checkout".to_string(),
                order_received_url: "https://shop.example.com/order-received".to_string(),
                site_name: "Ma Boutique".to_string(),
                enabled: true,
                skip_to_processor: false,
                processor_timeout_secs: 20,
            },
        }
    }

    #[test]
    fn payment_routes_creates_router() {
        let router = payment_routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[test]
    fn callback_routes_creates_router() {
        let router = callback_routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[test]
    fn gateway_router_creates_combined_router() {
        let router = gateway_router();
        let _: Router<()> = router.with_state(test_state());
    }
}
