//! Payment callback types, receipts, and gateway errors.

mod callback;
mod errors;
mod method;

pub use callback::{
    amounts_match, CallbackFields, PaymentCallback, PaymentReceipt, DEFAULT_PROVIDER_STATUS,
};
pub use errors::GatewayError;
pub use method::PaymentMethod;
