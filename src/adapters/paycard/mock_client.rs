//! Mock processor client for tests and local development.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::payment::GatewayError;
use crate::ports::{CreateSessionRequest, PaymentSession, ProcessorClient};

/// In-memory processor that records requests and returns a canned response.
pub struct MockProcessorClient {
    requests: Mutex<Vec<CreateSessionRequest>>,
    response: Mutex<Result<PaymentSession, GatewayError>>,
}

impl Default for MockProcessorClient {
    fn default() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: Mutex::new(Ok(PaymentSession {
                payment_url: "https://paycard.test/pay/mock".to_string(),
            })),
        }
    }
}

impl MockProcessorClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the canned response.
    pub fn set_response(&self, response: Result<PaymentSession, GatewayError>) {
        *self.response.lock().unwrap() = response;
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<CreateSessionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessorClient for MockProcessorClient {
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<PaymentSession, GatewayError> {
        self.requests.lock().unwrap().push(request);
        self.response.lock().unwrap().clone()
    }
}
