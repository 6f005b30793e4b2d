//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

#[cfg(test)]
pub mod memory;
pub mod openai;
pub mod postgres;

// Re-exports
pub use openai::OpenAiCompletionClient;
pub use postgres::{PgCacheStore, PgContextStore};
