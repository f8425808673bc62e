//! Session token codec.
//!
//! Sessions are self-describing signed tokens: the identity snapshot, issue
//! and expiry times are embedded in the token and verified against the
//! server secret on every request. There is no server-side session table.
//!
//! The algorithm is pinned to HS256. Tokens presenting any other algorithm
//! (including "none") fail verification outright.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use folio_core::{AdminRole, AdminUserId, Email};

use super::AuthError;
use crate::models::AdminIdentity;

/// Fixed issuer claim, checked on verification.
const ISSUER: &str = "folio";

/// Fixed audience claim, checked on verification.
const AUDIENCE: &str = "folio-admin";

/// Session lifetime: 7 days.
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Returns the standard session lifetime as a `chrono::Duration`.
#[must_use]
pub fn session_ttl() -> Duration {
    Duration::seconds(SESSION_TTL_SECS)
}

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user id.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Carried as a string so that forged tokens with an unknown role fail
    /// the explicit role check rather than silently deserializing.
    pub role: String,
    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds). A token is invalid from the
    /// instant `now >= exp`.
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// Encoder/verifier for session tokens.
///
/// Construction requires the configured signing secret; a server without a
/// secret cannot start (see `ServerConfig::from_env`).
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);
        // Exact expiry boundary; the explicit check in `verify` handles the
        // instant of expiry itself.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
        }
    }

    /// Encode an identity into a signed token valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenCreation` if signing fails.
    pub fn encode(&self, identity: &AdminIdentity, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.id.to_string(),
            email: identity.email.to_string(),
            name: identity.name.clone(),
            role: identity.role.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: ISSUER.to_owned(),
            aud: AUDIENCE.to_owned(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    // Structural parse without signature or expiry enforcement. Test aid
    // for asserting what `verify` rejects that a plain parse accepts.
    #[cfg(test)]
    fn decode(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }

    /// Fully verify a token and extract the identity it carries.
    ///
    /// Rejects on signature mismatch, algorithm mismatch, issuer/audience
    /// mismatch, expiry (`now >= exp`), and any role other than admin.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` on any of the above.
    pub fn verify(&self, token: &str) -> Result<AdminIdentity, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims = data.claims;

        // jsonwebtoken's expiry check is inclusive of the expiry instant;
        // the session contract is not.
        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::InvalidToken);
        }

        let role = AdminRole::parse(&claims.role).map_err(|_| AuthError::InvalidToken)?;
        if role != AdminRole::Admin {
            return Err(AuthError::InvalidToken);
        }

        let id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidToken)?;
        let email = Email::parse(&claims.email).map_err(|_| AuthError::InvalidToken)?;

        Ok(AdminIdentity {
            id: AdminUserId::new(id),
            email,
            name: claims.name,
            role,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_secret() -> SecretString {
        SecretString::from("kJ8!mN3@pQ7$rT2%vW9^xZ4&bC6*dF1(")
    }

    fn other_secret() -> SecretString {
        SecretString::from("zY5#wV8@uT3$sR6%qP9^oN2&mL4*kJ7(")
    }

    fn identity() -> AdminIdentity {
        AdminIdentity {
            id: AdminUserId::new(1),
            email: Email::parse("admin@x.com").unwrap(),
            name: "Site Admin".to_string(),
            role: AdminRole::Admin,
        }
    }

    fn raw_claims(codec_role: &str, exp_offset: i64, iss: &str, aud: &str) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "1".to_string(),
            email: "admin@x.com".to_string(),
            name: "Site Admin".to_string(),
            role: codec_role.to_string(),
            iat: now,
            exp: now + exp_offset,
            iss: iss.to_string(),
            aud: aud.to_string(),
        }
    }

    fn sign_with(secret: &SecretString, claims: &Claims, alg: Algorithm) -> String {
        jsonwebtoken::encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_roundtrips_identity() {
        let codec = TokenCodec::new(&test_secret());
        let token = codec.encode(&identity(), Duration::hours(1)).unwrap();
        let verified = codec.verify(&token).unwrap();
        assert_eq!(verified, identity());
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = TokenCodec::new(&test_secret());
        let token = codec.encode(&identity(), Duration::hours(-1)).unwrap();
        assert!(codec.verify(&token).is_err());
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        // A token whose expiry is the current instant is already invalid.
        let codec = TokenCodec::new(&test_secret());
        let token = codec.encode(&identity(), Duration::zero()).unwrap();
        assert!(codec.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec = TokenCodec::new(&test_secret());
        let forged = sign_with(
            &other_secret(),
            &raw_claims("admin", 3600, ISSUER, AUDIENCE),
            Algorithm::HS256,
        );
        assert!(codec.verify(&forged).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = TokenCodec::new(&test_secret());
        let token = codec.encode(&identity(), Duration::hours(1)).unwrap();

        // Flip one character of the payload segment.
        let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
        assert_eq!(parts.len(), 3);
        let payload = parts.get_mut(1).unwrap();
        let flipped = if payload.ends_with('A') { "B" } else { "A" };
        payload.truncate(payload.len() - 1);
        payload.push_str(flipped);
        let tampered = parts.join(".");

        assert!(codec.verify(&tampered).is_err());
    }

    #[test]
    fn test_non_admin_role_rejected() {
        let codec = TokenCodec::new(&test_secret());
        let token = sign_with(
            &test_secret(),
            &raw_claims("editor", 3600, ISSUER, AUDIENCE),
            Algorithm::HS256,
        );
        assert!(codec.verify(&token).is_err());
    }

    #[test]
    fn test_issuer_mismatch_rejected() {
        let codec = TokenCodec::new(&test_secret());
        let token = sign_with(
            &test_secret(),
            &raw_claims("admin", 3600, "someone-else", AUDIENCE),
            Algorithm::HS256,
        );
        assert!(codec.verify(&token).is_err());
    }

    #[test]
    fn test_audience_mismatch_rejected() {
        let codec = TokenCodec::new(&test_secret());
        let token = sign_with(
            &test_secret(),
            &raw_claims("admin", 3600, ISSUER, "another-app"),
            Algorithm::HS256,
        );
        assert!(codec.verify(&token).is_err());
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        // Same secret, different MAC algorithm: still a forgery vector,
        // still rejected.
        let codec = TokenCodec::new(&test_secret());
        let token = sign_with(
            &test_secret(),
            &raw_claims("admin", 3600, ISSUER, AUDIENCE),
            Algorithm::HS384,
        );
        assert!(codec.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let codec = TokenCodec::new(&test_secret());
        assert!(codec.verify("not-a-token").is_err());
        assert!(codec.verify("").is_err());
        assert!(codec.decode("not-a-token").is_none());
    }

    #[test]
    fn test_decode_does_not_enforce_expiry_or_signature() {
        let codec = TokenCodec::new(&test_secret());

        // Expired but structurally valid: decode still yields the claims.
        let expired = codec.encode(&identity(), Duration::hours(-1)).unwrap();
        let claims = codec.decode(&expired).unwrap();
        assert_eq!(claims.sub, "1");

        // Signed by someone else entirely: decode still parses it.
        let forged = sign_with(
            &other_secret(),
            &raw_claims("admin", 3600, ISSUER, AUDIENCE),
            Algorithm::HS256,
        );
        assert!(codec.decode(&forged).is_some());
        // But verification rejects it.
        assert!(codec.verify(&forged).is_err());
    }
}
