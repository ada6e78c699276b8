//! Foundation types shared across the domain.
//!
//! Value objects, identifiers, errors, and the state machine trait used by
//! the order and payment modules.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OrderId, ReconciliationId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
