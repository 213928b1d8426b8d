//! Key-value store adapters for the token cache

pub mod memory;

pub use memory::MemoryStore;
