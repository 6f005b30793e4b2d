//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod coach_service;
mod response_cache;

pub use coach_service::CoachService;
pub use response_cache::ResponseCache;
