//! Order aggregate and payment-status lifecycle.

mod aggregate;
mod status;

pub use aggregate::{
    Order, OrderNote, META_PAYMENT_METHOD, META_PAYMENT_STATUS, META_TRANSACTION_REFERENCE,
};
pub use status::OrderStatus;
