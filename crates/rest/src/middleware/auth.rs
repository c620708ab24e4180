//! Token authentication middleware.
//!
//! Write routes require a `TOKEN` header equal to the configured API token.
//! When no token is configured, every write request is rejected.

use axum::{
    extract::{Request, State},
    http::header::HeaderName,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::RestError;
use crate::state::AppState;

/// Header carrying the API token.
pub static TOKEN_HEADER: HeaderName = HeaderName::from_static("token");

/// Outcome of checking a request's token against the configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    /// The header matches the configured token.
    Accepted,
    /// The header is absent or empty.
    Missing,
    /// The header does not match, or no token is configured.
    Invalid,
}

impl TokenCheck {
    /// Compares a presented token with the expected one.
    pub fn evaluate(presented: Option<&str>, expected: Option<&str>) -> Self {
        match (presented.filter(|t| !t.is_empty()), expected) {
            (None, _) => TokenCheck::Missing,
            (Some(presented), Some(expected)) if !expected.is_empty() && presented == expected => {
                TokenCheck::Accepted
            }
            _ => TokenCheck::Invalid,
        }
    }
}

/// Middleware function for token authentication.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn require_token<S>(
    State(state): State<AppState<S>>,
    request: Request,
    next: Next,
) -> Response
where
    S: Send + Sync + 'static,
{
    let presented = request
        .headers()
        .get(&TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    match TokenCheck::evaluate(presented, state.config().api_token.as_deref()) {
        TokenCheck::Accepted => {
            debug!(method = %request.method(), path = %request.uri().path(), "Token accepted");
            next.run(request).await
        }
        TokenCheck::Missing => RestError::Unauthorized {
            message: "Token not found".to_string(),
        }
        .into_response(),
        TokenCheck::Invalid => {
            warn!(method = %request.method(), path = %request.uri().path(), "Rejected invalid token");
            RestError::Unauthorized {
                message: "Invalid token".to_string(),
            }
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_check() {
        assert_eq!(
            TokenCheck::evaluate(Some("abc"), Some("abc")),
            TokenCheck::Accepted
        );
        assert_eq!(TokenCheck::evaluate(None, Some("abc")), TokenCheck::Missing);
        assert_eq!(TokenCheck::evaluate(Some(""), Some("abc")), TokenCheck::Missing);
        assert_eq!(
            TokenCheck::evaluate(Some("abd"), Some("abc")),
            TokenCheck::Invalid
        );
    }

    #[test]
    fn test_unconfigured_token_rejects_everything() {
        assert_eq!(TokenCheck::evaluate(Some("abc"), None), TokenCheck::Invalid);
        assert_eq!(TokenCheck::evaluate(Some(""), Some("")), TokenCheck::Missing);
        assert_eq!(TokenCheck::evaluate(Some("x"), Some("")), TokenCheck::Invalid);
    }
}
