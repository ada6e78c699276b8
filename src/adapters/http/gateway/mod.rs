//! HTTP adapter for the gateway: checkout API and processor callback.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::GatewayAppState;
pub use routes::gateway_router;
