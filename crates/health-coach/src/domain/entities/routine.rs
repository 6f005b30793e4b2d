//! Routine - Daily routine planning request
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

/// Lowest value accepted on the 1-10 self-assessment scales
pub const SCALE_MIN: i32 = 1;
/// Highest value accepted on the 1-10 self-assessment scales
pub const SCALE_MAX: i32 = 10;

/// Routine planning request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoutineRequest {
    /// What the client is optimising for (e.g. "Focus", "Physique")
    pub peak_mode: String,
    pub sleep_chronotype: String,
    pub nature_of_commutes: String,
    pub nature_of_traveling: String,
    /// 1-10, where 10 is easiest
    pub easiness_of_regimen: i32,
    /// 1-10, where 10 is highest
    pub observation_level: i32,
    pub challenges: Vec<String>,
}

impl RoutineRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_scale("easiness_of_regimen", self.easiness_of_regimen)?;
        check_scale("observation_level", self.observation_level)
    }
}

fn check_scale(field: &str, value: i32) -> Result<(), DomainError> {
    if (SCALE_MIN..=SCALE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "{} must be between {} and {}, got {}",
            field, SCALE_MIN, SCALE_MAX, value
        )))
    }
}
