//! Order aggregate.
//!
//! The order itself is owned by the external store; this type is the
//! gateway's view of it, carrying the fields reconciliation reads and the
//! transitions it is allowed to perform. Notes are append-only audit strings;
//! metadata persists the processor's transaction reference, method, and
//! reported status once a payment completes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, StateMachine, Timestamp, ValidationError};
use crate::domain::payment::PaymentReceipt;

use super::OrderStatus;

/// Metadata key for the processor-assigned transaction reference.
pub const META_TRANSACTION_REFERENCE: &str = "paycard_transaction_reference";

/// Metadata key for the processor-reported payment method.
pub const META_PAYMENT_METHOD: &str = "paycard_payment_method";

/// Metadata key for the processor-reported payment status.
pub const META_PAYMENT_STATUS: &str = "paycard_payment_status";

/// A single append-only audit note on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNote {
    pub body: String,
    pub created_at: Timestamp,
}

/// The gateway's view of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier, immutable once created.
    pub id: OrderId,

    /// Human-facing order number used in payment descriptions.
    pub number: String,

    /// Authoritative total, set at checkout, immutable after creation.
    pub total: Decimal,

    /// Current payment status.
    pub status: OrderStatus,

    /// Tag of the gateway that handles this order.
    pub payment_method: String,

    /// Append-only audit notes.
    pub notes: Vec<OrderNote>,

    /// Processor metadata persisted at reconciliation.
    pub metadata: std::collections::BTreeMap<String, String>,

    /// When the order was created.
    pub created_at: Timestamp,
}

impl Order {
    /// Creates a pending order awaiting payment.
    pub fn pending(
        id: OrderId,
        number: impl Into<String>,
        total: Decimal,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            id,
            number: number.into(),
            total,
            status: OrderStatus::Pending,
            payment_method: payment_method.into(),
            notes: Vec::new(),
            metadata: std::collections::BTreeMap::new(),
            created_at: Timestamp::now(),
        }
    }

    /// Returns true if the order currently has the given status.
    pub fn has_status(&self, status: OrderStatus) -> bool {
        self.status == status
    }

    /// Appends an audit note.
    pub fn add_note(&mut self, body: impl Into<String>) {
        self.notes.push(OrderNote {
            body: body.into(),
            created_at: Timestamp::now(),
        });
    }

    /// Puts the order on hold for manual review, recording the reason.
    ///
    /// Only valid from `Pending`.
    pub fn hold(&mut self, reason: &str) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(OrderStatus::OnHold)?;
        self.add_note(reason.to_string());
        Ok(())
    }

    /// Completes the order with the given receipt.
    ///
    /// Persists the processor metadata, transitions to `Completed`, and
    /// appends the success audit note. Only valid from `Pending`.
    pub fn complete(&mut self, receipt: &PaymentReceipt) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(OrderStatus::Completed)?;
        self.metadata.insert(
            META_TRANSACTION_REFERENCE.to_string(),
            receipt.transaction_reference.clone(),
        );
        self.metadata.insert(
            META_PAYMENT_METHOD.to_string(),
            receipt.payment_method.tag().to_string(),
        );
        self.metadata
            .insert(META_PAYMENT_STATUS.to_string(), receipt.provider_status.clone());
        self.add_note(format!(
            "Paid via {}. Ref: {}, amount: {}.",
            receipt.payment_method.label(),
            receipt.transaction_reference,
            receipt.amount
        ));
        Ok(())
    }
}
