//! Per-order serialization for callback reconciliation.
//!
//! Concurrent callbacks for the SAME order are serialized through an async
//! mutex keyed by order id; callbacks for different orders proceed in
//! parallel. The store's compare-and-swap is the hard guarantee, the lock
//! keeps the note and notice side effects from interleaving.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

use crate::domain::foundation::OrderId;

/// Registry of per-order async locks.
#[derive(Default)]
pub struct OrderLockRegistry {
    locks: StdMutex<HashMap<OrderId, Arc<Mutex<()>>>>,
}

impl OrderLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for an order, creating it on first use.
    pub fn lock_for(&self, order_id: &OrderId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(order_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_order_shares_a_lock() {
        let registry = OrderLockRegistry::new();
        let id = OrderId::new("77").unwrap();

        let a = registry.lock_for(&id);
        let b = registry.lock_for(&id);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_orders_get_distinct_locks() {
        let registry = OrderLockRegistry::new();
        let a = registry.lock_for(&OrderId::new("1").unwrap());
        let b = registry.lock_for(&OrderId::new("2").unwrap());
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn lock_serializes_critical_sections() {
        let registry = Arc::new(OrderLockRegistry::new());
        let id = OrderId::new("77").unwrap();
        let counter = Arc::new(StdMutex::new(0u32));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            let id = id.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                let lock = registry.lock_for(&id);
                let _guard = lock.lock().await;
                let mut count = counter.lock().unwrap();
                *count += 1;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*counter.lock().unwrap(), 8);
    }
}
