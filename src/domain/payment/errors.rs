//! Gateway error taxonomy.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | OrderNotFound | 404 |
//! | EmptyTotal | 400 |
//! | IncompleteCallback | 400 |
//! | NotAwaitingPayment | 409 |
//! | MerchantCodeMismatch | 409 |
//! | AmountMismatch | 409 |
//! | Disabled | 503 |
//! | Transport | 502 |
//! | ProviderRejected | 502 |
//! | Infrastructure | 500 |

use rust_decimal::Decimal;

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::order::OrderStatus;

/// Errors raised by payment initiation and callback reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The referenced order does not exist.
    OrderNotFound(OrderId),

    /// The order has no positive total to charge.
    EmptyTotal(OrderId),

    /// The callback is missing a required field.
    IncompleteCallback { missing: &'static str },

    /// The order is not awaiting payment.
    NotAwaitingPayment {
        order_id: OrderId,
        current: OrderStatus,
    },

    /// The echoed merchant code does not match configuration.
    MerchantCodeMismatch,

    /// The callback amount does not match the order total.
    AmountMismatch {
        order_total: Decimal,
        received: String,
    },

    /// The gateway is disabled by configuration.
    Disabled,

    /// Network failure talking to the processor.
    Transport { detail: String },

    /// The processor rejected the session-creation request.
    ProviderRejected { raw_body: String },

    /// Infrastructure error (order store, etc).
    Infrastructure(String),
}

impl GatewayError {
    pub fn order_not_found(order_id: OrderId) -> Self {
        GatewayError::OrderNotFound(order_id)
    }

    pub fn empty_total(order_id: OrderId) -> Self {
        GatewayError::EmptyTotal(order_id)
    }

    pub fn incomplete_callback(missing: &'static str) -> Self {
        GatewayError::IncompleteCallback { missing }
    }

    pub fn not_awaiting_payment(order_id: OrderId, current: OrderStatus) -> Self {
        GatewayError::NotAwaitingPayment { order_id, current }
    }

    pub fn amount_mismatch(order_total: Decimal, received: impl Into<String>) -> Self {
        GatewayError::AmountMismatch {
            order_total,
            received: received.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        GatewayError::Transport {
            detail: detail.into(),
        }
    }

    pub fn provider_rejected(raw_body: impl Into<String>) -> Self {
        GatewayError::ProviderRejected {
            raw_body: raw_body.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        GatewayError::Infrastructure(message.into())
    }

    /// Human-readable message for notices and API responses.
    pub fn message(&self) -> String {
        match self {
            GatewayError::OrderNotFound(id) => format!("Order {} does not exist", id),
            GatewayError::EmptyTotal(id) => {
                format!("Order {} has no amount to charge", id)
            }
            GatewayError::IncompleteCallback { missing } => {
                format!("Payment data is incomplete: missing {}", missing)
            }
            GatewayError::NotAwaitingPayment { order_id, current } => format!(
                "Order {} is not awaiting payment (status: {})",
                order_id, current
            ),
            GatewayError::MerchantCodeMismatch => {
                "The e-commerce code does not match the configured code".to_string()
            }
            GatewayError::AmountMismatch {
                order_total,
                received,
            } => format!(
                "Payment amount [{}] does not match the order total [{}]",
                received, order_total
            ),
            GatewayError::Disabled => "The payment gateway is disabled".to_string(),
            GatewayError::Transport { detail } => {
                format!("Could not reach the payment processor: {}", detail)
            }
            GatewayError::ProviderRejected { raw_body } => {
                format!("Payment processing failed. Details: {}", raw_body)
            }
            GatewayError::Infrastructure(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for GatewayError {}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        GatewayError::Infrastructure(err.to_string())
    }
}
