//! RequestKind - The four coaching flows

use serde::{Deserialize, Serialize};

/// Kind of coaching request; doubles as the endpoint name in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Routine,
    Nutrition,
    FollowUp,
    Chat,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::Routine => write!(f, "routine"),
            RequestKind::Nutrition => write!(f, "nutrition"),
            RequestKind::FollowUp => write!(f, "follow_up"),
            RequestKind::Chat => write!(f, "chat"),
        }
    }
}

