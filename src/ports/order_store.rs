//! Order store port.
//!
//! The order system of record lives outside this service. This port is the
//! contract reconciliation depends on; the completion operation is a
//! compare-and-swap so that concurrent callbacks for the same order cannot
//! both complete it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::payment::PaymentReceipt;

/// Result of a compare-and-swap completion attempt.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    /// The order was pending and is now completed.
    Completed(Order),

    /// The order was no longer pending; carries the status found.
    NotPending(OrderStatus),
}

/// Port for reading and transitioning orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetch an order by id.
    async fn find_by_id(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Append an audit note to an order.
    async fn add_note(&self, order_id: &OrderId, body: &str) -> Result<(), DomainError>;

    /// Put a pending order on hold, recording the reason as a note.
    async fn hold(&self, order_id: &OrderId, reason: &str) -> Result<(), DomainError>;

    /// Atomically complete the order if it is still pending.
    ///
    /// On success the store persists the receipt metadata and the success
    /// note in the same step as the status change. If the order is in any
    /// other state the store leaves it untouched and reports the status it
    /// found.
    async fn complete_if_pending(
        &self,
        order_id: &OrderId,
        receipt: &PaymentReceipt,
    ) -> Result<CompletionOutcome, DomainError>;
}
