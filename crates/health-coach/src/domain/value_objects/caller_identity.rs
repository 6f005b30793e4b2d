//! CallerIdentity - Who a request is made on behalf of

use serde::{Deserialize, Serialize};

/// Caller identity, taken verbatim from a bearer token or defaulted to "anonymous".
///
/// Used as the document key for per-user context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    pub const ANONYMOUS: &'static str = "anonymous";

    /// Build an identity; blank input collapses to anonymous.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::anonymous()
        } else {
            Self(value)
        }
    }

    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    /// Extract the token from an `Authorization` header value.
    ///
    /// Only the `Bearer <token>` scheme is recognised.
    pub fn from_bearer(header: Option<&str>) -> Option<Self> {
        let token = header?.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    /// A bearer token wins over an identity claimed in the body.
    pub fn resolve(bearer: Option<Self>, claimed: Option<&str>) -> Self {
        bearer.unwrap_or_else(|| claimed.map(Self::new).unwrap_or_else(Self::anonymous))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == Self::ANONYMOUS
    }
}

impl Default for CallerIdentity {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl std::fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_is_used_verbatim() {
        let id = CallerIdentity::from_bearer(Some("Bearer user-42")).unwrap();
        assert_eq!(id.as_str(), "user-42");
    }

    #[test]
    fn test_non_bearer_headers_are_ignored() {
        assert!(CallerIdentity::from_bearer(None).is_none());
        assert!(CallerIdentity::from_bearer(Some("Basic abc")).is_none());
        assert!(CallerIdentity::from_bearer(Some("Bearer   ")).is_none());
    }

    #[test]
    fn test_resolve_prefers_bearer() {
        let bearer = CallerIdentity::from_bearer(Some("Bearer tok"));
        assert_eq!(CallerIdentity::resolve(bearer, Some("body-user")).as_str(), "tok");
        assert_eq!(
            CallerIdentity::resolve(None, Some("body-user")).as_str(),
            "body-user"
        );
        assert!(CallerIdentity::resolve(None, None).is_anonymous());
        assert!(CallerIdentity::resolve(None, Some("")).is_anonymous());
    }
}
