//! ReconcileCallbackHandler - command handler for processor payment callbacks.
//!
//! Reconciliation is the trust boundary of the gateway: the callback only
//! claims a payment happened, and the stored order total is the only amount
//! that counts. The handler never fails outward; every path resolves to a
//! redirect so the shopper always lands somewhere sensible.

use std::sync::Arc;

use secrecy::ExposeSecret;
use subtle::ConstantTimeEq;
use tracing::{error, info, warn};

use crate::config::GatewayConfig;
use crate::domain::foundation::{OrderId, ReconciliationId};
use crate::domain::order::Order;
use crate::domain::payment::{amounts_match, CallbackFields, GatewayError, PaymentCallback};
use crate::ports::{CompletionObserver, CompletionOutcome, NoticeLevel, NoticeSink, OrderStore};

use super::order_locks::OrderLockRegistry;

/// How a callback was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Order completed with this callback's payment.
    Completed { transaction_reference: String },

    /// Amount could not be verified; order parked for manual review.
    OnHold,

    /// Callback rejected before touching the order (incomplete, unknown order).
    Rejected,

    /// Order was no longer awaiting payment; nothing changed.
    NotPending,

    /// Infrastructure failure while reconciling.
    Failed,
}

/// Resolution of a callback: where to send the shopper, and what happened.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub redirect_url: String,
    pub outcome: ReconcileOutcome,
}

/// Handler that validates a processor callback against the stored order and
/// transitions the order accordingly.
pub struct ReconcileCallbackHandler {
    order_store: Arc<dyn OrderStore>,
    notice_sink: Arc<dyn NoticeSink>,
    completion_observer: Arc<dyn CompletionObserver>,
    order_locks: Arc<OrderLockRegistry>,
    config: GatewayConfig,
}

impl ReconcileCallbackHandler {
    pub fn new(
        order_store: Arc<dyn OrderStore>,
        notice_sink: Arc<dyn NoticeSink>,
        completion_observer: Arc<dyn CompletionObserver>,
        order_locks: Arc<OrderLockRegistry>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            order_store,
            notice_sink,
            completion_observer,
            order_locks,
            config,
        }
    }

    /// Reconciles a callback. Never errors: every path yields a redirect.
    pub async fn handle(&self, fields: CallbackFields) -> Reconciliation {
        let reconciliation_id = ReconciliationId::new();

        let callback = match PaymentCallback::from_fields(fields) {
            Ok(callback) => callback,
            Err(err) => {
                warn!(%reconciliation_id, error = %err, "callback rejected");
                self.notice_sink.push(NoticeLevel::Error, &err.message());
                return Reconciliation {
                    redirect_url: self.config.checkout_url.clone(),
                    outcome: ReconcileOutcome::Rejected,
                };
            }
        };

        // Serialize concurrent callbacks for the same order
        let lock = self.order_locks.lock_for(&callback.order_id);
        let _guard = lock.lock().await;

        let order = match self.order_store.find_by_id(&callback.order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                let err = GatewayError::order_not_found(callback.order_id.clone());
                warn!(%reconciliation_id, order_id = %callback.order_id, "callback for unknown order");
                self.notice_sink.push(NoticeLevel::Error, &err.message());
                return Reconciliation {
                    redirect_url: self.config.checkout_url.clone(),
                    outcome: ReconcileOutcome::Rejected,
                };
            }
            Err(err) => return self.store_failure(&reconciliation_id, &callback.order_id, err),
        };

        if !order.status.is_awaiting_payment() {
            return self.not_pending(&reconciliation_id, &order);
        }

        // Merchant code mismatch is recorded but does not block on its own;
        // the amount check against the stored total is the real gate.
        if !self.merchant_code_matches(&callback.merchant_code) {
            warn!(%reconciliation_id, order_id = %order.id, "merchant code mismatch on callback");
            let err = GatewayError::MerchantCodeMismatch;
            self.notice_sink.push(NoticeLevel::Error, &err.message());
            if let Err(store_err) = self
                .order_store
                .add_note(&order.id, &err.message())
                .await
            {
                return self.store_failure(&reconciliation_id, &order.id, store_err);
            }
        }

        let amount = match callback.parsed_amount() {
            Some(amount) if amounts_match(order.total, amount) => amount,
            _ => return self.park_on_hold(&reconciliation_id, &order, &callback).await,
        };

        match self
            .order_store
            .complete_if_pending(&order.id, &callback.receipt(amount))
            .await
        {
            Ok(CompletionOutcome::Completed(completed)) => {
                info!(
                    %reconciliation_id,
                    order_id = %completed.id,
                    transaction_reference = %callback.transaction_reference,
                    "order completed"
                );
                let receipt = callback.receipt(amount);
                if let Err(err) = self
                    .completion_observer
                    .order_completed(&completed, &receipt)
                    .await
                {
                    // The payment is reconciled; fulfilment hooks must not undo it
                    error!(%reconciliation_id, order_id = %completed.id, error = %err, "completion observer failed");
                }
                self.notice_sink
                    .push(NoticeLevel::Success, "Paiement recu. Merci !");
                Reconciliation {
                    redirect_url: self.config.order_received_url_for(completed.id.as_str()),
                    outcome: ReconcileOutcome::Completed {
                        transaction_reference: callback.transaction_reference,
                    },
                }
            }
            Ok(CompletionOutcome::NotPending(status)) => {
                info!(%reconciliation_id, order_id = %order.id, status = %status, "completion lost the race");
                let mut order = order;
                order.status = status;
                self.not_pending(&reconciliation_id, &order)
            }
            Err(err) => self.store_failure(&reconciliation_id, &order.id, err),
        }
    }

    fn merchant_code_matches(&self, echoed: &str) -> bool {
        let expected = self.config.merchant_code();
        expected
            .expose_secret()
            .as_bytes()
            .ct_eq(echoed.as_bytes())
            .into()
    }

    /// Parks the order on hold when the amount is missing, unparseable, or
    /// does not match the total. The payment evidence goes into the note and
    /// the shopper is sent back to checkout.
    async fn park_on_hold(
        &self,
        reconciliation_id: &ReconciliationId,
        order: &Order,
        callback: &PaymentCallback,
    ) -> Reconciliation {
        let err = GatewayError::amount_mismatch(order.total, callback.amount.clone());
        let reason = format!(
            "{}. Ref: {}. Order on hold for manual review.",
            err.message(),
            callback.transaction_reference
        );
        warn!(%reconciliation_id, order_id = %order.id, "amount mismatch, holding order");

        if let Err(store_err) = self.order_store.hold(&order.id, &reason).await {
            return self.store_failure(reconciliation_id, &order.id, store_err);
        }

        self.notice_sink.push(NoticeLevel::Error, &err.message());
        Reconciliation {
            redirect_url: self.config.checkout_url.clone(),
            outcome: ReconcileOutcome::OnHold,
        }
    }

    /// No success path was reached: the order is not awaiting payment, so
    /// nothing changes and the shopper is sent back to checkout.
    fn not_pending(&self, reconciliation_id: &ReconciliationId, order: &Order) -> Reconciliation {
        info!(%reconciliation_id, order_id = %order.id, status = %order.status, "order not awaiting payment");
        let err = GatewayError::not_awaiting_payment(order.id.clone(), order.status);
        self.notice_sink.push(NoticeLevel::Error, &err.message());
        Reconciliation {
            redirect_url: self.config.checkout_url.clone(),
            outcome: ReconcileOutcome::NotPending,
        }
    }

    fn store_failure(
        &self,
        reconciliation_id: &ReconciliationId,
        order_id: &OrderId,
        err: crate::domain::foundation::DomainError,
    ) -> Reconciliation {
        error!(%reconciliation_id, %order_id, error = %err, "order store failure during reconciliation");
        self.notice_sink.push(
            NoticeLevel::Error,
            "Une erreur est survenue lors de la verification du paiement. Contactez le support.",
        );
        Reconciliation {
            redirect_url: self.config.checkout_url.clone(),
            outcome: ReconcileOutcome::Failed,
        }
    }
}
