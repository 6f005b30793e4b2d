//! Caller Identity (Bearer Token)
//!
//! There is no credential check: a bearer token, when present, is the
//! caller's identity.

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};

use health_coach::CallerIdentity;

/// Identity taken from the `Authorization` header, if one was supplied
#[derive(Debug, Clone, Default)]
pub struct BearerIdentity(pub Option<CallerIdentity>);

impl BearerIdentity {
    /// Header identity, or anonymous
    pub fn or_anonymous(&self) -> CallerIdentity {
        self.0.clone().unwrap_or_default()
    }
}

/// Identity middleware
/// Resolves the bearer token before any handler (and so any storage access) runs
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let identity = CallerIdentity::from_bearer(auth_header);
    tracing::debug!(authenticated = identity.is_some(), "Resolved caller identity");

    request.extensions_mut().insert(BearerIdentity(identity));
    next.run(request).await
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<BearerIdentity>()
            .cloned()
            .unwrap_or_default())
    }
}
