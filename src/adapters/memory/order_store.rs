//! In-memory order store.
//!
//! Backs tests and local development. The completion operation performs a
//! real compare-and-swap under the store lock, so concurrent callbacks
//! observe the same semantics as a transactional backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::payment::PaymentReceipt;
use crate::ports::{CompletionOutcome, OrderStore};

/// Mutex-guarded map of orders.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: Mutex<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an order.
    pub fn insert(&self, order: Order) {
        self.orders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(order.id.clone(), order);
    }

    /// Current snapshot of an order, for assertions.
    pub fn snapshot(&self, order_id: &OrderId) -> Option<Order> {
        self.orders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(order_id)
            .cloned()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_by_id(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(order_id)
            .cloned())
    }

    async fn add_note(&self, order_id: &OrderId, body: &str) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap_or_else(|e| e.into_inner());
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| DomainError::store(format!("order {} not found", order_id)))?;
        order.add_note(body);
        Ok(())
    }

    async fn hold(&self, order_id: &OrderId, reason: &str) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap_or_else(|e| e.into_inner());
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| DomainError::store(format!("order {} not found", order_id)))?;
        order
            .hold(reason)
            .map_err(|e| DomainError::store(e.to_string()))?;
        Ok(())
    }

    async fn complete_if_pending(
        &self,
        order_id: &OrderId,
        receipt: &PaymentReceipt,
    ) -> Result<CompletionOutcome, DomainError> {
        let mut orders = self.orders.lock().unwrap_or_else(|e| e.into_inner());
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| DomainError::store(format!("order {} not found", order_id)))?;

        if order.status != OrderStatus::Pending {
            return Ok(CompletionOutcome::NotPending(order.status));
        }

        order
            .complete(receipt)
            .map_err(|e| DomainError::store(e.to_string()))?;
        Ok(CompletionOutcome::Completed(order.clone()))
    }
}
