//! HTTP handlers for the gateway endpoints.
//!
//! These handlers connect Axum routes to the application layer command
//! handlers. The callback handlers never fail: whatever happens, the shopper
//! is redirected somewhere sensible by the reconciler.

use std::sync::Arc;

use axum::extract::{Form, Json, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};

use crate::application::handlers::{
    InitiatePaymentCommand, InitiatePaymentHandler, OrderLockRegistry, ReconcileCallbackHandler,
};
use crate::config::GatewayConfig;
use crate::domain::foundation::OrderId;
use crate::domain::payment::GatewayError;
use crate::ports::{CompletionObserver, NoticeSink, OrderStore, ProcessorClient};

use super::dto::{CallbackParams, CheckoutRequest, CheckoutResponse, ErrorResponse};

/// Shared application state containing all gateway dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped trait objects.
#[derive(Clone)]
pub struct GatewayAppState {
    pub order_store: Arc<dyn OrderStore>,
    pub processor_client: Arc<dyn ProcessorClient>,
    pub notice_sink: Arc<dyn NoticeSink>,
    pub completion_observer: Arc<dyn CompletionObserver>,
    pub order_locks: Arc<OrderLockRegistry>,
    pub gateway_config: GatewayConfig,
}

impl GatewayAppState {
    /// Create handlers on demand from the shared state.
    pub fn initiate_payment_handler(&self) -> InitiatePaymentHandler {
        InitiatePaymentHandler::new(
            self.order_store.clone(),
            self.processor_client.clone(),
            self.gateway_config.clone(),
        )
    }

    pub fn reconcile_callback_handler(&self) -> ReconcileCallbackHandler {
        ReconcileCallbackHandler::new(
            self.order_store.clone(),
            self.notice_sink.clone(),
            self.completion_observer.clone(),
            self.order_locks.clone(),
            self.gateway_config.clone(),
        )
    }
}

/// POST /api/payments/checkout - Open a hosted payment session
pub async fn create_checkout(
    State(state): State<GatewayAppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, GatewayApiError> {
    let order_id = OrderId::new(request.order_id)
        .map_err(|_| GatewayError::incomplete_callback("order_id"))?;

    let handler = state.initiate_payment_handler();
    let result = handler.handle(InitiatePaymentCommand { order_id }).await?;

    let response = CheckoutResponse {
        redirect_url: result.redirect_url,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/callbacks/paycard - Processor callback (query string)
pub async fn handle_callback_get(
    State(state): State<GatewayAppState>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    reconcile(state, params).await
}

/// POST /api/callbacks/paycard - Processor callback (form body)
pub async fn handle_callback_post(
    State(state): State<GatewayAppState>,
    Form(params): Form<CallbackParams>,
) -> Redirect {
    reconcile(state, params).await
}

async fn reconcile(state: GatewayAppState, params: CallbackParams) -> Redirect {
    let handler = state.reconcile_callback_handler();
    let reconciliation = handler.handle(params.into()).await;
    Redirect::to(&reconciliation.redirect_url)
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// API error type that converts gateway errors to HTTP responses.
pub struct GatewayApiError(GatewayError);

impl From<GatewayError> for GatewayApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for GatewayApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            GatewayError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
            GatewayError::EmptyTotal(_) => (StatusCode::BAD_REQUEST, "EMPTY_TOTAL"),
            GatewayError::IncompleteCallback { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            GatewayError::NotAwaitingPayment { .. } => {
                (StatusCode::CONFLICT, "NOT_AWAITING_PAYMENT")
            }
            GatewayError::MerchantCodeMismatch => {
                (StatusCode::CONFLICT, "MERCHANT_CODE_MISMATCH")
            }
            GatewayError::AmountMismatch { .. } => (StatusCode::CONFLICT, "AMOUNT_MISMATCH"),
            GatewayError::Disabled => (StatusCode::SERVICE_UNAVAILABLE, "GATEWAY_DISABLED"),
            GatewayError::Transport { .. } => (StatusCode::BAD_GATEWAY, "PROCESSOR_UNREACHABLE"),
            GatewayError::ProviderRejected { .. } => {
                (StatusCode::BAD_GATEWAY, "PROCESSOR_REJECTED")
            }
            GatewayError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn order_not_found_maps_to_404() {
        let err = GatewayApiError(GatewayError::order_not_found(
            OrderId::new("1042").unwrap(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn disabled_maps_to_503() {
        let response = GatewayApiError(GatewayError::Disabled).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn processor_failures_map_to_502() {
        let response =
            GatewayApiError(GatewayError::transport("connection reset")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response =
            GatewayApiError(GatewayError::provider_rejected("{\"code\":13}")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn amount_mismatch_maps_to_409() {
        let response =
            GatewayApiError(GatewayError::amount_mismatch(dec!(10000), "9000")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
