//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use health_coach::{
    BodyComposition, ChatMessage, ChatRequest, CompletionResult, FollowUpRequestBody,
    MessageRole, NutritionRequest, OriginalRequestType, RoutineRequest,
};

use super::coach::ErrorBody;
use super::health::HealthCheck;

/// Registers the optional bearer token that identifies the caller
struct BearerIdentityScheme;

impl Modify for BearerIdentityScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::health_check,
        super::coach::routine,
        super::coach::nutrition,
        super::coach::follow_up,
        super::coach::chat,
    ),
    info(
        title = "Health Coach API",
        version = "0.1.0",
        description = "LLM gateway for routine planning, nutrition planning, follow-up questions and coaching chat.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Coach", description = "Coaching flows backed by the LLM provider"),
    ),
    modifiers(&BearerIdentityScheme),
    components(
        schemas(
            HealthCheck,
            ErrorBody,
            CompletionResult,
            // Requests
            RoutineRequest,
            NutritionRequest,
            BodyComposition,
            FollowUpRequestBody,
            OriginalRequestType,
            ChatRequest,
            ChatMessage,
            MessageRole,
        )
    ),
)]
pub struct ApiDoc;
