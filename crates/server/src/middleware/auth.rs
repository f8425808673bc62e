//! Admin authentication gate.
//!
//! Provides the extractor that protects admin route handlers. A handler
//! that takes `RequireAdmin` never runs unless the request carries a valid
//! session cookie; otherwise the request short-circuits with a 401 JSON
//! rejection.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::auth::{AuthError, SessionState, verify_session};
use crate::error::AppError;
use crate::models::AdminIdentity;
use crate::state::AppState;

/// Extractor that requires an authenticated administrator.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub AdminIdentity);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let app = AppState::from_ref(state);

        match verify_session(app.tokens(), &jar) {
            SessionState::Authenticated(identity) => Ok(Self(identity)),
            SessionState::Missing => {
                tracing::debug!(path = %parts.uri.path(), "admin request without session cookie");
                Err(AppError::Auth(AuthError::MissingToken))
            }
            SessionState::Invalid => {
                tracing::debug!(path = %parts.uri.path(), "admin request with invalid session cookie");
                Err(AppError::Auth(AuthError::InvalidToken))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Json, Router, body::Body, http::Request, http::StatusCode, routing::get};
    use chrono::Duration;
    use tower::ServiceExt;

    use folio_core::{AdminRole, AdminUserId, Email};

    use super::*;
    use crate::auth::{SESSION_COOKIE_NAME, session_ttl};
    use crate::state::AppState;

    async fn whoami(RequireAdmin(admin): RequireAdmin) -> Json<serde_json::Value> {
        Json(serde_json::json!({ "email": admin.email }))
    }

    fn app() -> (Router, AppState) {
        let state = AppState::for_tests();
        let router = Router::new()
            .route("/protected", get(whoami))
            .with_state(state.clone());
        (router, state)
    }

    fn identity() -> AdminIdentity {
        AdminIdentity {
            id: AdminUserId::new(1),
            email: Email::parse("admin@x.com").unwrap(),
            name: "Site Admin".to_string(),
            role: AdminRole::Admin,
        }
    }

    #[tokio::test]
    async fn test_gate_rejects_without_cookie() {
        let (router, _state) = app();
        let response = router
            .oneshot(Request::get("/protected").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No authentication token found");
    }

    #[tokio::test]
    async fn test_gate_rejects_expired_cookie() {
        let (router, state) = app();
        let token = state
            .tokens()
            .encode(&identity(), Duration::hours(-1))
            .unwrap();
        let response = router
            .oneshot(
                Request::get("/protected")
                    .header("cookie", format!("{SESSION_COOKIE_NAME}={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gate_passes_valid_cookie_through() {
        let (router, state) = app();
        let token = state.tokens().encode(&identity(), session_ttl()).unwrap();
        let response = router
            .oneshot(
                Request::get("/protected")
                    .header("cookie", format!("{SESSION_COOKIE_NAME}={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["email"], "admin@x.com");
    }
}
