//! HTTP DTOs for the gateway endpoints.
//!
//! These types define the wire structure of the checkout API and the
//! processor callback. Callback field names follow the processor's contract
//! verbatim (`transactionReference`, `montant`, `c`, `paycardPaymentMethod`).

use serde::{Deserialize, Serialize};

use crate::domain::payment::CallbackFields;

/// Request to initiate payment for an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// Id of the order to pay.
    pub order_id: String,
}

/// Response carrying the hosted payment page URL.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    /// URL the shopper must be redirected to.
    pub redirect_url: String,
}

/// Processor callback parameters, accepted as query string or form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub order_id: Option<String>,

    #[serde(default, rename = "transactionReference")]
    pub transaction_reference: Option<String>,

    #[serde(default)]
    pub montant: Option<String>,

    #[serde(default)]
    pub c: Option<String>,

    #[serde(default, rename = "paycardPaymentMethod")]
    pub paycard_payment_method: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

impl From<CallbackParams> for CallbackFields {
    fn from(params: CallbackParams) -> Self {
        CallbackFields {
            order_id: params.order_id,
            transaction_reference: params.transaction_reference,
            amount: params.montant,
            merchant_code: params.c,
            payment_method: params.paycard_payment_method,
            status: params.status,
        }
    }
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_params_deserialize_processor_names() {
        let query = "order_id=1042&transactionReference=TXN-001&montant=10000&c=SHOP-42&paycardPaymentMethod=orange_money";
        let params: CallbackParams = serde_urlencoded::from_str(query).unwrap();

        assert_eq!(params.order_id.as_deref(), Some("1042"));
        assert_eq!(params.transaction_reference.as_deref(), Some("TXN-001"));
        assert_eq!(params.montant.as_deref(), Some("10000"));
        assert_eq!(params.c.as_deref(), Some("SHOP-42"));
        assert_eq!(
            params.paycard_payment_method.as_deref(),
            Some("orange_money")
        );
        assert!(params.status.is_none());
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let params: CallbackParams = serde_urlencoded::from_str("order_id=1042").unwrap();
        assert!(params.montant.is_none());
        assert!(params.c.is_none());
    }

    #[test]
    fn conversion_maps_wire_names_to_domain_fields() {
        let params = CallbackParams {
            order_id: Some("1042".to_string()),
            transaction_reference: Some("TXN-001".to_string()),
            montant: Some("10000".to_string()),
            c: Some("SHOP-42".to_string()),
            paycard_payment_method: Some("cc".to_string()),
            status: Some("success".to_string()),
        };

        let fields: CallbackFields = params.into();
        assert_eq!(fields.amount.as_deref(), Some("10000"));
        assert_eq!(fields.merchant_code.as_deref(), Some("SHOP-42"));
        assert_eq!(fields.payment_method.as_deref(), Some("cc"));
    }
}
