//! Log-backed adapters for notices and completion hooks.
//!
//! The storefront normally renders notices and fulfilment reacts to
//! completions; until those systems are wired in, both surface through the
//! structured log so nothing is silently dropped.

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::foundation::DomainError;
use crate::domain::order::Order;
use crate::domain::payment::PaymentReceipt;
use crate::ports::{CompletionObserver, NoticeLevel, NoticeSink};

/// Notice sink that writes shopper notices to the log.
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn push(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => info!(notice = message, "shopper notice"),
            NoticeLevel::Error => error!(notice = message, "shopper notice"),
        }
    }
}

/// Completion observer that logs completed payments.
pub struct LoggingCompletionObserver;

#[async_trait]
impl CompletionObserver for LoggingCompletionObserver {
    async fn order_completed(
        &self,
        order: &Order,
        receipt: &PaymentReceipt,
    ) -> Result<(), DomainError> {
        info!(
            order_id = %order.id,
            transaction_reference = %receipt.transaction_reference,
            payment_method = %receipt.payment_method,
            amount = %receipt.amount,
            "order completed"
        );
        Ok(())
    }
}
