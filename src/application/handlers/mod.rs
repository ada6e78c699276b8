//! Command handlers orchestrating domain logic through ports.

mod initiate_payment;
mod order_locks;
mod reconcile_callback;

pub use initiate_payment::{InitiatePaymentCommand, InitiatePaymentHandler, InitiatePaymentResult};
pub use order_locks::OrderLockRegistry;
pub use reconcile_callback::{Reconciliation, ReconcileCallbackHandler, ReconcileOutcome};
