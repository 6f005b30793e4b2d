//! Follow-up - Questions about a previously generated plan
//!
//! The wire format pairs a string discriminator with a free-form object.
//! It is parsed once into the closed [`OriginalRequest`] union so every
//! consumer matches exhaustively.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

/// Which flow produced the plan being asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OriginalRequestType {
    Routine,
    Nutrition,
}

/// Follow-up request as it arrives over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FollowUpRequestBody {
    /// Accepted for client compatibility; follow-ups store nothing
    #[serde(default)]
    pub user_id: Option<String>,
    pub original_request_type: OriginalRequestType,
    /// The body of the original routine or nutrition request
    #[schema(value_type = Object)]
    pub original_request_data: serde_json::Map<String, serde_json::Value>,
    pub follow_up_question: String,
}

/// The subset of a routine request a follow-up recalls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutineRecall {
    #[serde(default)]
    pub peak_mode: Option<String>,
    #[serde(default)]
    pub sleep_chronotype: Option<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
}

/// The subset of a nutrition request a follow-up recalls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecall {
    #[serde(default)]
    pub target_goal: Option<String>,
    #[serde(default)]
    pub macronutrient_preferences: Option<String>,
    #[serde(default)]
    pub carb_tolerance: Option<String>,
    #[serde(default)]
    pub protein_source_preference: Option<String>,
}

/// The plan a follow-up question refers to
#[derive(Debug, Clone, PartialEq)]
pub enum OriginalRequest {
    Routine(RoutineRecall),
    Nutrition(NutritionRecall),
}

/// Validated follow-up request
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "FollowUpRequestBody")]
pub struct FollowUpRequest {
    pub original: OriginalRequest,
    pub follow_up_question: String,
}

impl TryFrom<FollowUpRequestBody> for FollowUpRequest {
    type Error = DomainError;

    fn try_from(body: FollowUpRequestBody) -> Result<Self, Self::Error> {
        if body.follow_up_question.trim().is_empty() {
            return Err(DomainError::validation("follow_up_question must not be blank"));
        }

        let data = serde_json::Value::Object(body.original_request_data);
        let original = match body.original_request_type {
            OriginalRequestType::Routine => serde_json::from_value(data)
                .map(OriginalRequest::Routine)
                .map_err(|e| {
                    DomainError::validation(format!("invalid routine original_request_data: {e}"))
                })?,
            OriginalRequestType::Nutrition => serde_json::from_value(data)
                .map(OriginalRequest::Nutrition)
                .map_err(|e| {
                    DomainError::validation(format!(
                        "invalid nutrition original_request_data: {e}"
                    ))
                })?,
        };

        Ok(Self {
            original,
            follow_up_question: body.follow_up_question,
        })
    }
}
