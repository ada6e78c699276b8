//! Order payment-status state machine.
//!
//! Defines the order states the gateway can observe and the transitions
//! reconciliation is allowed to perform.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Awaiting payment. The only state reconciliation acts on.
    Pending,

    /// Payment received but flagged for manual review (amount mismatch).
    OnHold,

    /// Payment reconciled successfully.
    Completed,

    /// Cancelled by the shopper or the merchant.
    Cancelled,

    /// Payment failed at the processor.
    Failed,

    /// Completed order refunded by the merchant.
    Refunded,
}

impl OrderStatus {
    /// Returns true if the order is still awaiting payment.
    pub fn is_awaiting_payment(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Status tag as persisted by the store ("pending", "on-hold", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Failed => "failed",
            OrderStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Completed)
                | (Pending, OnHold)
                | (Pending, Cancelled)
                | (Pending, Failed)
            // From ON_HOLD (manual resolution only)
                | (OnHold, Completed)
                | (OnHold, Cancelled)
            // From COMPLETED
                | (Completed, Refunded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![Completed, OnHold, Cancelled, Failed],
            OnHold => vec![Completed, Cancelled],
            Completed => vec![Refunded],
            Cancelled => vec![],
            Failed => vec![],
            Refunded => vec![],
        }
    }
}
