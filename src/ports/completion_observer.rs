//! Completion observer port.
//!
//! Hook fired exactly once per order, after a successful completion.
//! Fulfilment side effects (stock, emails) hang off this seam; observer
//! failures never roll back the completed order.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::order::Order;
use crate::domain::payment::PaymentReceipt;

/// Port notified after an order completes.
#[async_trait]
pub trait CompletionObserver: Send + Sync {
    async fn order_completed(
        &self,
        order: &Order,
        receipt: &PaymentReceipt,
    ) -> Result<(), DomainError>;
}
