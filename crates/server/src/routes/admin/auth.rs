//! Admin authentication routes: login, identity check, logout.
//!
//! Login is ANONYMOUS -> AUTHENTICATED: a credential match issues a signed
//! session token delivered as an HTTP-only cookie. There is no server-side
//! session to tear down - logout just clears the cookie, and tokens
//! otherwise lapse at their embedded expiry.

use axum::{
    Json, Router, middleware,
    extract::State,
    routing::{get, post},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::auth::{AuthService, SESSION_COOKIE_NAME, SESSION_TTL_SECS, session_ttl};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::middleware::rate_limit::login_rate_limit;
use crate::models::AdminIdentity;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login / identity-check response body.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub message: String,
    pub user: AdminIdentity,
}

/// Logout response body.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Build the auth router. Login is rate limited per client IP.
#[must_use]
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            post(login).layer(middleware::from_fn_with_state(
                state.clone(),
                login_rate_limit,
            )),
        )
        .route("/me", get(me))
        .route("/logout", post(logout))
}

/// Authenticate and set the session cookie.
///
/// POST /api/admin/login
#[instrument(skip(state, jar, request), fields(email = %request.email))]
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let user = AuthService::new(state.pool())
        .verify_credentials(&request.email, &request.password)
        .await?;

    let identity = AdminIdentity::from(&user);
    let token = state.tokens().encode(&identity, session_ttl())?;
    let cookie = session_cookie(token, state.config().is_secure());

    tracing::info!(admin = %identity.email, "admin logged in");

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            success: true,
            message: "Logged in".to_string(),
            user: identity,
        }),
    ))
}

/// Return the identity behind the session cookie.
///
/// GET /api/admin/me
async fn me(RequireAdmin(admin): RequireAdmin) -> Json<SessionResponse> {
    Json(SessionResponse {
        success: true,
        message: "Authenticated".to_string(),
        user: admin,
    })
}

/// Clear the session cookie.
///
/// POST /api/admin/logout
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let removal = Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build();

    (
        jar.remove(removal),
        Json(LogoutResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
}

/// Build the session cookie: HTTP-only, SameSite=Lax, site-wide, 7-day
/// max-age, Secure when the site is served over HTTPS.
fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use chrono::Duration;
    use tower::ServiceExt;

    use folio_core::{AdminRole, AdminUserId, Email};

    use super::*;

    fn app() -> (Router, AppState) {
        let state = AppState::for_tests();
        let router = router(&state).with_state(state.clone());
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

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_with_empty_fields_is_rejected() {
        let (router, _state) = app();
        let response = router
            .oneshot(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"email":"","password":""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_me_without_cookie_is_unauthorized() {
        let (router, _state) = app();
        let response = router
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No authentication token found");
    }

    #[tokio::test]
    async fn test_me_with_expired_cookie_is_unauthorized() {
        let (router, state) = app();
        let token = state
            .tokens()
            .encode(&identity(), Duration::hours(-1))
            .unwrap();
        let response = router
            .oneshot(
                Request::get("/me")
                    .header(header::COOKIE, format!("{SESSION_COOKIE_NAME}={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_with_valid_cookie_returns_identity() {
        let (router, state) = app();
        let token = state.tokens().encode(&identity(), session_ttl()).unwrap();
        let response = router
            .oneshot(
                Request::get("/me")
                    .header(header::COOKIE, format!("{SESSION_COOKIE_NAME}={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "admin@x.com");
        assert_eq!(body["user"]["role"], "admin");
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (router, _state) = app();
        let response = router
            .oneshot(Request::post("/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with(SESSION_COOKIE_NAME));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("token-value".to_string(), true);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(SESSION_TTL_SECS))
        );
    }

    #[test]
    fn test_session_cookie_not_secure_in_dev() {
        let cookie = session_cookie("token-value".to_string(), false);
        assert_ne!(cookie.secure(), Some(true));
    }
}
