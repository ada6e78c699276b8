//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `order` - Order aggregate and payment-status lifecycle
//! - `payment` - Processor callbacks, amount matching, error taxonomy

pub mod foundation;
pub mod order;
pub mod payment;
