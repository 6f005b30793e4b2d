//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Routine / Nutrition: plan-generating requests
//! - FollowUp / Chat: conversational requests
//! - Completion: uniform LLM result
//! - CacheEntry: cached completion by fingerprint
//! - UserContext: per-caller remembered requests
//! - Message: role/content pairs sent to the provider

mod cache_entry;
mod chat;
mod completion;
mod follow_up;
mod message;
mod nutrition;
mod routine;
mod user_context;

pub use cache_entry::*;
pub use chat::*;
pub use completion::*;
pub use follow_up::*;
pub use message::*;
pub use nutrition::*;
pub use routine::*;
pub use user_context::*;
