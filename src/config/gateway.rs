//! Gateway configuration (PayCard merchant account and URLs)

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// PayCard gateway configuration.
///
/// The merchant code ("Code E-Commerce") is the shared secret identifying the
/// merchant account with the processor; it is sent on initiation and echoed
/// back in the callback for integrity checking.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant / E-Commerce code
    pub merchant_code: String,

    /// Processor session-creation endpoint
    #[serde(default = "default_epay_url")]
    pub epay_url: String,

    /// Public URL the processor delivers callbacks to
    pub callback_url: String,

    /// Checkout page URL (default redirect for failed reconciliations)
    pub checkout_url: String,

    /// Order-received ("thank you") page base URL
    pub order_received_url: String,

    /// Site name used in the payment description
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Whether the gateway accepts new payments
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Whether the processor should skip its method-selection page
    #[serde(default)]
    pub skip_to_processor: bool,

    /// Timeout for the outbound session-creation call, in seconds
    #[serde(default = "default_processor_timeout")]
    pub processor_timeout_secs: u64,
}

impl GatewayConfig {
    /// Merchant code wrapped for safe handling.
    pub fn merchant_code(&self) -> SecretString {
        SecretString::new(self.merchant_code.clone())
    }

    /// Order-received URL for a specific order.
    pub fn order_received_url_for(&self, order_id: &str) -> String {
        format!("{}/{}", self.order_received_url.trim_end_matches('/'), order_id)
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_code.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__MERCHANT_CODE"));
        }
        validate_url("GATEWAY__EPAY_URL", &self.epay_url)?;
        validate_url("GATEWAY__CALLBACK_URL", &self.callback_url)?;
        validate_url("GATEWAY__CHECKOUT_URL", &self.checkout_url)?;
        validate_url("GATEWAY__ORDER_RECEIVED_URL", &self.order_received_url)?;
        if self.processor_timeout_secs == 0 || self.processor_timeout_secs > 120 {
            return Err(ValidationError::InvalidProcessorTimeout);
        }
        Ok(())
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingRequired(field));
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(field));
    }
    Ok(())
}

fn default_epay_url() -> String {
    "https://paycard.co/epay/create/".to_string()
}

fn default_site_name() -> String {
    "Boutique".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_processor_timeout() -> u64 {
    20
}
