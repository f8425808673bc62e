//! Session verification from the request cookie.
//!
//! Distinguishes "no cookie at all" from "cookie present but invalid" for
//! observability; the auth gate denies both identically.

use axum_extra::extract::CookieJar;

use super::token::TokenCodec;
use crate::models::AdminIdentity;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "admin-token";

/// Outcome of inspecting a request's session cookie.
#[derive(Debug)]
pub enum SessionState {
    /// A valid session token was presented; here is who it belongs to.
    Authenticated(AdminIdentity),
    /// No session cookie on the request.
    Missing,
    /// A session cookie was presented but failed verification.
    Invalid,
}

impl SessionState {
    /// The identity, if the session verified.
    #[must_use]
    pub fn identity(self) -> Option<AdminIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Missing | Self::Invalid => None,
        }
    }
}

/// Verify the session cookie on a request, if any.
#[must_use]
pub fn verify_session(codec: &TokenCodec, jar: &CookieJar) -> SessionState {
    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        return SessionState::Missing;
    };

    match codec.verify(cookie.value()) {
        Ok(identity) => SessionState::Authenticated(identity),
        Err(_) => SessionState::Invalid,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum_extra::extract::cookie::Cookie;
    use chrono::Duration;
    use secrecy::SecretString;

    use folio_core::{AdminRole, AdminUserId, Email};

    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(&SecretString::from("kJ8!mN3@pQ7$rT2%vW9^xZ4&bC6*dF1("))
    }

    fn identity() -> AdminIdentity {
        AdminIdentity {
            id: AdminUserId::new(1),
            email: Email::parse("admin@x.com").unwrap(),
            name: "Site Admin".to_string(),
            role: AdminRole::Admin,
        }
    }

    #[test]
    fn test_no_cookie_is_missing() {
        let jar = CookieJar::new();
        assert!(matches!(
            verify_session(&codec(), &jar),
            SessionState::Missing
        ));
    }

    #[test]
    fn test_valid_cookie_authenticates() {
        let codec = codec();
        let token = codec.encode(&identity(), Duration::hours(1)).unwrap();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, token));

        match verify_session(&codec, &jar) {
            SessionState::Authenticated(who) => assert_eq!(who, identity()),
            other => panic!("expected authenticated session, got {other:?}"),
        }
    }

    #[test]
    fn test_expired_cookie_is_invalid_not_missing() {
        let codec = codec();
        let token = codec.encode(&identity(), Duration::hours(-1)).unwrap();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, token));

        assert!(matches!(
            verify_session(&codec, &jar),
            SessionState::Invalid
        ));
    }

    #[test]
    fn test_garbage_cookie_is_invalid() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, "garbage"));
        assert!(matches!(
            verify_session(&codec(), &jar),
            SessionState::Invalid
        ));
    }

    #[test]
    fn test_cookie_under_other_name_is_missing() {
        let codec = codec();
        let token = codec.encode(&identity(), Duration::hours(1)).unwrap();
        let jar = CookieJar::new().add(Cookie::new("some-other-cookie", token));

        assert!(matches!(
            verify_session(&codec, &jar),
            SessionState::Missing
        ));
    }
}
