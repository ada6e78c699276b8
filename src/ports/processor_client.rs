//! Processor client port.
//!
//! Contract for creating a hosted payment session at the external processor.
//! The HTTP adapter implements this against the PayCard ePay endpoint; tests
//! use an in-memory mock.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::OrderId;
use crate::domain::payment::GatewayError;

/// Request to open a hosted payment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// Order the session pays for.
    pub order_id: OrderId,

    /// Amount to charge, the authoritative order total.
    pub amount: Decimal,

    /// Description shown to the shopper on the hosted page.
    pub description: String,

    /// Absolute URL the processor calls back after payment.
    pub callback_url: String,
}

/// A hosted payment session at the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSession {
    /// URL the shopper is redirected to for payment.
    pub payment_url: String,
}

/// Port for the external payment processor.
#[async_trait]
pub trait ProcessorClient: Send + Sync {
    /// Create a hosted payment session and return the redirect target.
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<PaymentSession, GatewayError>;
}
