//! Domain Services
//!
//! Pure functions over domain entities: no I/O.

mod fingerprint;
pub mod prompt_builder;

pub use fingerprint::{fingerprint, fingerprint_value};
