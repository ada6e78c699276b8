//! Ports: trait contracts between the application core and the outside world.
//!
//! Adapters implement these; handlers depend only on the traits.

mod completion_observer;
mod notice_sink;
mod order_store;
mod processor_client;

pub use completion_observer::CompletionObserver;
pub use notice_sink::{NoticeLevel, NoticeSink};
pub use order_store::{CompletionOutcome, OrderStore};
pub use processor_client::{CreateSessionRequest, PaymentSession, ProcessorClient};
