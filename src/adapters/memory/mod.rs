//! In-memory adapters for tests and local development.

mod order_store;

pub use order_store::InMemoryOrderStore;
