//! Callback parsing and amount reconciliation.
//!
//! The processor calls back with loosely-typed form or query fields. This
//! module validates presence of the required fields, produces the typed
//! [`PaymentCallback`], and decides whether the reported amount matches the
//! order total within the accepted tolerance.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::OrderId;

use super::errors::GatewayError;
use super::method::PaymentMethod;

/// Status the processor reports when it omits the `status` field.
pub const DEFAULT_PROVIDER_STATUS: &str = "success";

/// Relative tolerance accepted between order total and reported amount.
///
/// A payment matches when `|total - amount| / amount < 0.001`.
static AMOUNT_TOLERANCE: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 3));

/// Raw callback fields as received on the wire, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallbackFields {
    pub order_id: Option<String>,
    pub transaction_reference: Option<String>,
    pub amount: Option<String>,
    pub merchant_code: Option<String>,
    pub payment_method: Option<String>,
    pub status: Option<String>,
}

/// A validated processor callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCallback {
    pub order_id: OrderId,
    pub transaction_reference: String,
    /// Amount exactly as reported, kept raw for audit notes.
    pub amount: String,
    pub merchant_code: String,
    pub payment_method: PaymentMethod,
    pub provider_status: String,
}

impl PaymentCallback {
    /// Validates raw fields into a typed callback.
    ///
    /// `order_id`, `transactionReference`, `montant` and `c` are required;
    /// `status` defaults to "success" and the payment method to `Other("")`
    /// when absent.
    pub fn from_fields(fields: CallbackFields) -> Result<Self, GatewayError> {
        let order_id_raw = fields
            .order_id
            .filter(|v| !v.trim().is_empty())
            .ok_or(GatewayError::IncompleteCallback { missing: "order_id" })?;
        let order_id = OrderId::new(order_id_raw)
            .map_err(|_| GatewayError::IncompleteCallback { missing: "order_id" })?;

        let transaction_reference = fields
            .transaction_reference
            .filter(|v| !v.trim().is_empty())
            .ok_or(GatewayError::IncompleteCallback {
                missing: "transactionReference",
            })?;

        let amount = fields
            .amount
            .filter(|v| !v.trim().is_empty())
            .ok_or(GatewayError::IncompleteCallback { missing: "montant" })?;

        let merchant_code = fields
            .merchant_code
            .filter(|v| !v.trim().is_empty())
            .ok_or(GatewayError::IncompleteCallback { missing: "c" })?;

        let payment_method = fields
            .payment_method
            .map(|tag| PaymentMethod::parse(&tag))
            .unwrap_or_else(|| PaymentMethod::Other(String::new()));

        let provider_status = fields
            .status
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROVIDER_STATUS.to_string());

        Ok(Self {
            order_id,
            transaction_reference,
            amount,
            merchant_code,
            payment_method,
            provider_status,
        })
    }

    /// The reported amount as a decimal, if it parses to a positive value.
    pub fn parsed_amount(&self) -> Option<Decimal> {
        Decimal::from_str(self.amount.trim())
            .ok()
            .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
    }

    /// Builds the receipt persisted when this callback completes an order.
    pub fn receipt(&self, amount: Decimal) -> PaymentReceipt {
        PaymentReceipt {
            transaction_reference: self.transaction_reference.clone(),
            payment_method: self.payment_method.clone(),
            provider_status: self.provider_status.clone(),
            amount,
        }
    }
}

/// Evidence of a completed payment, persisted into order metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub transaction_reference: String,
    pub payment_method: PaymentMethod,
    pub provider_status: String,
    pub amount: Decimal,
}

/// Returns true when the reported amount matches the order total within
/// the relative tolerance.
pub fn amounts_match(order_total: Decimal, reported: Decimal) -> bool {
    if reported.is_zero() || reported.is_sign_negative() {
        return false;
    }
    let deviation = (order_total - reported).abs() / reported;
    deviation < *AMOUNT_TOLERANCE
}
