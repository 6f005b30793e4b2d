//! UserContext - What we remember about a caller between requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NutritionRequest, RoutineRequest};

/// A value with the time it was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    pub value: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> Stamped<T> {
    pub fn now(value: T) -> Self {
        Self {
            value,
            timestamp: Utc::now(),
        }
    }
}

/// The last chat exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub message: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn now(message: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Per-caller context document.
///
/// Fields are written independently; a write to one never clears another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_routine_request: Option<Stamped<RoutineRequest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_nutrition_request: Option<Stamped<NutritionRequest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_chat: Option<ChatTurn>,
}

impl UserContext {
    pub const ROUTINE_FIELD: &'static str = "last_routine_request";
    pub const NUTRITION_FIELD: &'static str = "last_nutrition_request";
    pub const CHAT_FIELD: &'static str = "last_chat";

    pub fn routine(&self) -> Option<&RoutineRequest> {
        self.last_routine_request.as_ref().map(|s| &s.value)
    }

    pub fn nutrition(&self) -> Option<&NutritionRequest> {
        self.last_nutrition_request.as_ref().map(|s| &s.value)
    }
}
