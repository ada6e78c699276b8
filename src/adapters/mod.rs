//! Adapters: concrete implementations of the ports.

pub mod http;
pub mod logging;
pub mod memory;
pub mod paycard;
