//! PostgreSQL Repository Implementations

mod cache_store;
mod context_store;
mod document_store;

pub use cache_store::PgCacheStore;
pub use context_store::PgContextStore;
use document_store::PgDocumentStore;
