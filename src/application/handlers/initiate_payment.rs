//! InitiatePaymentHandler - command handler for starting a hosted payment.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::domain::foundation::OrderId;
use crate::domain::payment::GatewayError;
use crate::ports::{CreateSessionRequest, OrderStore, ProcessorClient};

/// Command to initiate payment for an order.
#[derive(Debug, Clone)]
pub struct InitiatePaymentCommand {
    /// Order to open a payment session for.
    pub order_id: OrderId,
}

/// Result of a successful initiation.
#[derive(Debug, Clone)]
pub struct InitiatePaymentResult {
    /// Hosted payment page the shopper is redirected to.
    pub redirect_url: String,
}

/// Handler that opens a hosted payment session for a pending order.
///
/// The amount and description are always derived from the stored order;
/// nothing from the request body influences what gets charged.
pub struct InitiatePaymentHandler {
    order_store: Arc<dyn OrderStore>,
    processor_client: Arc<dyn ProcessorClient>,
    config: GatewayConfig,
}

impl InitiatePaymentHandler {
    pub fn new(
        order_store: Arc<dyn OrderStore>,
        processor_client: Arc<dyn ProcessorClient>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            order_store,
            processor_client,
            config,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiatePaymentCommand,
    ) -> Result<InitiatePaymentResult, GatewayError> {
        if !self.config.enabled {
            return Err(GatewayError::Disabled);
        }

        let order = self
            .order_store
            .find_by_id(&cmd.order_id)
            .await?
            .ok_or_else(|| GatewayError::order_not_found(cmd.order_id.clone()))?;

        if order.total.is_zero() || order.total.is_sign_negative() {
            warn!(order_id = %order.id, total = %order.total, "order has no chargeable amount");
            return Err(GatewayError::empty_total(order.id));
        }

        let description = format!(
            "Paiement {} - Commande : {}",
            self.config.site_name, order.number
        );

        let session = self
            .processor_client
            .create_session(CreateSessionRequest {
                order_id: order.id.clone(),
                amount: order.total,
                description,
                callback_url: self.config.callback_url.clone(),
            })
            .await?;

        info!(order_id = %order.id, "payment session created");

        Ok(InitiatePaymentResult {
            redirect_url: session.payment_url,
        })
    }
}
