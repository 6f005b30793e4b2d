//! Nutrition - Nutrition planning request
//!
//! Pure domain entity without infrastructure dependencies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::RoutineRequest;
use crate::domain::errors::DomainError;

/// Body composition measurements, keyed by metric name.
///
/// An open map (e.g. `{"weight_kg": 82, "body_fat_pct": 18.5}`) restricted to
/// scalar JSON values. Keys are kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct BodyComposition(BTreeMap<String, serde_json::Value>);

impl BodyComposition {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (key, value) in &self.0 {
            if key.trim().is_empty() {
                return Err(DomainError::validation(
                    "current_body_composition keys must not be blank",
                ));
            }
            if value.is_object() || value.is_array() {
                return Err(DomainError::validation(format!(
                    "current_body_composition.{} must be a number, string or boolean",
                    key
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for BodyComposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "Not provided");
        }
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(s) => format!("{}: {}", key, s),
                other => format!("{}: {}", key, other),
            })
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}

/// Nutrition planning request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionRequest {
    pub current_body_composition: BodyComposition,
    pub target_goal: String,
    pub activity_level: String,
    pub daily_step_count: i64,
    pub resting_metabolic_rate: i64,
    pub macronutrient_preferences: String,
    pub intermittent_fasting: bool,
    pub num_meals_per_day: i32,
    pub eating_window: String,
    pub protein_source_preference: String,
    pub carb_tolerance: String,
    pub fat_preference: String,
    pub food_sensitivities: Vec<String>,
    pub cultural_dietary_category: String,
    pub cooking_ability: String,
    pub meal_prep_frequency: String,
    pub eating_out_frequency: String,
    pub kitchen_access: String,
    pub existing_supplements: Vec<String>,
    pub willingness_to_supplement: bool,
    pub water_intake_target: String,
    pub caffeine_consumption: String,
    pub electrolyte_needs: String,
    /// Usually recalled from the caller's last routine request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<String>>,
}

impl NutritionRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.current_body_composition.validate()?;
        if self.num_meals_per_day < 0 {
            return Err(DomainError::validation(
                "num_meals_per_day must not be negative",
            ));
        }
        Ok(())
    }

    /// Carry the routine's peak mode and challenges over to this request,
    /// replacing whatever the request said itself.
    pub fn enriched_with(&self, routine: &RoutineRequest) -> Self {
        Self {
            peak_mode: Some(routine.peak_mode.clone()),
            challenges: Some(routine.challenges.clone()),
            ..self.clone()
        }
    }
}
