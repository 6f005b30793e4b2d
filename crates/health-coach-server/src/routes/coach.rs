//! Coaching Routes - Routine, nutrition, follow-up and chat
//!
//! HTTP handlers that delegate to CoachService for business logic.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_coach::{
    CallerIdentity, ChatRequest, CompletionResult, DomainError, FollowUpRequest,
    NutritionRequest, RequestKind, RoutineRequest,
};

use crate::auth::BearerIdentity;
use crate::telemetry::truncate_for_log;
use crate::AppState;

/// Error payload returned by every coaching endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

/// Log a failed request and convert it to its HTTP response.
/// The response carries the full message; the log line a truncated copy.
fn api_error(kind: RequestKind, error: DomainError) -> ApiError {
    let status =
        StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let detail = error.to_string();
    let logged = truncate_for_log(&detail);

    if status.is_server_error() {
        tracing::error!(
            endpoint = %kind,
            status = status.as_u16(),
            error = %logged,
            "Request failed"
        );
    } else {
        tracing::warn!(
            endpoint = %kind,
            status = status.as_u16(),
            error = %logged,
            "Request rejected"
        );
    }

    (status, Json(ErrorBody { detail }))
}

/// Generate a daily routine
#[utoipa::path(
    post,
    path = "/api/routine",
    request_body = RoutineRequest,
    responses(
        (status = 200, description = "Routine plan generated or served from cache", body = CompletionResult),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 503, description = "LLM provider unreachable", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "Coach"
)]
pub async fn routine(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Json(payload): Json<RoutineRequest>,
) -> Result<Json<CompletionResult>, ApiError> {
    state
        .coach
        .routine(&identity.or_anonymous(), &payload)
        .await
        .map(Json)
        .map_err(|e| api_error(RequestKind::Routine, e))
}

/// Generate a nutrition plan
#[utoipa::path(
    post,
    path = "/api/nutrition",
    request_body = NutritionRequest,
    responses(
        (status = 200, description = "Nutrition plan generated or served from cache", body = CompletionResult),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 503, description = "LLM provider unreachable", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "Coach"
)]
pub async fn nutrition(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Json(payload): Json<NutritionRequest>,
) -> Result<Json<CompletionResult>, ApiError> {
    state
        .coach
        .nutrition(&identity.or_anonymous(), &payload)
        .await
        .map(Json)
        .map_err(|e| api_error(RequestKind::Nutrition, e))
}

/// Ask a question about an earlier plan
#[utoipa::path(
    post,
    path = "/api/follow_up",
    request_body = health_coach::FollowUpRequestBody,
    responses(
        (status = 200, description = "Follow-up answer", body = CompletionResult),
        (status = 422, description = "Unknown original_request_type or malformed data"),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 503, description = "LLM provider unreachable", body = ErrorBody)
    ),
    tag = "Coach"
)]
pub async fn follow_up(
    State(state): State<AppState>,
    Json(payload): Json<FollowUpRequest>,
) -> Result<Json<CompletionResult>, ApiError> {
    state
        .coach
        .follow_up(&payload)
        .await
        .map(Json)
        .map_err(|e| api_error(RequestKind::FollowUp, e))
}

/// Chat with the coach
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat reply", body = CompletionResult),
        (status = 400, description = "Blank message", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 503, description = "LLM provider unreachable", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "Coach"
)]
pub async fn chat(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<CompletionResult>, ApiError> {
    let identity = CallerIdentity::resolve(identity.0, payload.user_id.as_deref());

    state
        .coach
        .chat(&identity, &payload)
        .await
        .map(Json)
        .map_err(|e| api_error(RequestKind::Chat, e))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/routine", post(routine))
        .route("/api/nutrition", post(nutrition))
        .route("/api/follow_up", post(follow_up))
        .route("/api/chat", post(chat))
}
