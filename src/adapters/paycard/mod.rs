//! PayCard processor adapter.

mod client;
mod mock_client;

pub use client::PaycardClient;
pub use mock_client::MockProcessorClient;
