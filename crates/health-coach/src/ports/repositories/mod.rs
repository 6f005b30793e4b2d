//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod cache_store;
mod context_store;

pub use cache_store::*;
pub use context_store::*;
