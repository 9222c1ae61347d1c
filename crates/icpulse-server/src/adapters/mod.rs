//! Infrastructure adapters backing the domain ports.

pub mod memory_store;

pub use memory_store::InMemoryStore;
