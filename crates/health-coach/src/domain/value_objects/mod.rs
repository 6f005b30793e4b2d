//! Value Objects
//!
//! Immutable value types used across the domain.

mod caller_identity;
mod request_kind;

pub use caller_identity::*;
pub use request_kind::*;
