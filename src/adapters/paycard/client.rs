//! PayCard ePay client.
//!
//! Implements [`ProcessorClient`] against the PayCard session-creation
//! endpoint. The request is a URL-encoded form POST; the response is JSON
//! with a numeric `code` (0 on success) and the hosted `payment_url`.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GatewayConfig;
use crate::domain::payment::GatewayError;
use crate::ports::{CreateSessionRequest, PaymentSession, ProcessorClient};

/// HTTP client for the PayCard ePay endpoint.
pub struct PaycardClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl PaycardClient {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.processor_timeout_secs))
            .build()
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl ProcessorClient for PaycardClient {
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<PaymentSession, GatewayError> {
        let merchant_code = self.config.merchant_code();
        let jump = if self.config.skip_to_processor {
            "on"
        } else {
            "off"
        };

        let amount = request.amount.to_string();
        let form = [
            ("order_id", request.order_id.as_str()),
            ("c", merchant_code.expose_secret().as_str()),
            ("paycard-amount", amount.as_str()),
            ("paycard-description", request.description.as_str()),
            ("paycard-callback-url", request.callback_url.as_str()),
            ("paycard-jump-to-paycard", jump),
        ];

        let response = self
            .http
            .post(&self.config.epay_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::transport(format!(
                "processor returned HTTP {}",
                status
            )));
        }

        debug!(body = %body, "processor session response");
        parse_session_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    code: i64,
    #[serde(default)]
    payment_url: Option<String>,
}

/// Parses the processor's session-creation response body.
///
/// Success is `code == 0` with a non-empty `payment_url`; anything else is a
/// rejection carrying the raw body for the audit trail.
fn parse_session_response(body: &str) -> Result<PaymentSession, GatewayError> {
    let parsed: SessionResponse = serde_json::from_str(body)
        .map_err(|_| GatewayError::provider_rejected(body.to_string()))?;

    match (parsed.code, parsed.payment_url) {
        (0, Some(payment_url)) if !payment_url.trim().is_empty() => {
            Ok(PaymentSession { payment_url })
        }
        _ => Err(GatewayError::provider_rejected(body.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_yields_payment_url() {
        let body = r#"{"code":0,"payment_url":"https://paycard.co/pay/abc123"}"#;
        let session = parse_session_response(body).unwrap();
        assert_eq!(session.payment_url, "https://paycard.co/pay/abc123");
    }

    #[test]
    fn nonzero_code_is_rejected_with_raw_body() {
        let body = r#"{"code":13,"message":"unknown merchant"}"#;
        let err = parse_session_response(body).unwrap_err();
        match err {
            GatewayError::ProviderRejected { raw_body } => {
                assert!(raw_body.contains("unknown merchant"));
            }
            other => panic!("expected ProviderRejected, got {:?}", other),
        }
    }

    #[test]
    fn success_code_without_url_is_rejected() {
        let body = r#"{"code":0}"#;
        assert!(matches!(
            parse_session_response(body),
            Err(GatewayError::ProviderRejected { .. })
        ));
    }

    #[test]
    fn non_json_body_is_rejected_with_raw_body() {
        let body = "<html>502 Bad Gateway</html>";
        match parse_session_response(body).unwrap_err() {
            GatewayError::ProviderRejected { raw_body } => assert_eq!(raw_body, body),
            other => panic!("expected ProviderRejected, got {:?}", other),
        }
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let body = r#"{"code":0,"payment_url":"https://paycard.co/pay/x","expires":"2026-01-01"}"#;
        assert!(parse_session_response(body).is_ok());
    }
}
