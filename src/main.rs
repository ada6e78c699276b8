//! ccpay-gateway service entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ccpay_gateway::adapters::http::{gateway_router, GatewayAppState};
use ccpay_gateway::adapters::logging::{LoggingCompletionObserver, TracingNoticeSink};
use ccpay_gateway::adapters::memory::InMemoryOrderStore;
use ccpay_gateway::adapters::paycard::PaycardClient;
use ccpay_gateway::application::handlers::OrderLockRegistry;
use ccpay_gateway::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let processor_client = PaycardClient::new(config.gateway.clone())?;

    let state = GatewayAppState {
        order_store: Arc::new(InMemoryOrderStore::new()),
        processor_client: Arc::new(processor_client),
        notice_sink: Arc::new(TracingNoticeSink),
        completion_observer: Arc::new(LoggingCompletionObserver),
        order_locks: Arc::new(OrderLockRegistry::new()),
        gateway_config: config.gateway.clone(),
    };

    let app = Router::new()
        .nest("/api", gateway_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .with_state(state);

    let addr = config.server.socket_addr()?;
    info!(%addr, environment = %config.server.environment, "starting ccpay-gateway");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
