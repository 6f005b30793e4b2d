//! Health Coach Domain Library
//!
//! Core domain types and interfaces for the health coaching gateway.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Request payloads, completion results, cache and context records
//!   - `value_objects/`: Immutable value types (CallerIdentity, RequestKind)
//!   - `services/`: Pure domain services (prompt templates, fingerprints)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Response cache and user context persistence
//!   - `services/`: LLM completion provider
//!
//! # Usage
//!
//! ```rust,ignore
//! use health_coach::domain::{RoutineRequest, prompt_builder};
//! use health_coach::ports::{CacheStore, CompletionProvider};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    fingerprint, fingerprint_value, prompt_builder, BodyComposition, CacheEntry, CallerIdentity,
    ChatMessage, ChatRequest, ChatTurn, CompletionResult, DomainError, FollowUpRequest,
    FollowUpRequestBody, MessageRole, NutritionRecall, NutritionRequest, OriginalRequest,
    OriginalRequestType, RequestKind, RoutineRecall, RoutineRequest, Stamped, UserContext,
    CACHE_TTL_SECS,
};
pub use ports::{CacheStore, CompletionProvider, CompletionSettings, ContextStore};
