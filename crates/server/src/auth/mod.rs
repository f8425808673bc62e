//! Authentication: credential checks, session tokens, session verification.
//!
//! The credential store is the `admin_users` table; passwords are stored as
//! salted bcrypt hashes and never compared in plaintext. Email lookup is
//! case-insensitive by construction (`Email` normalizes to lowercase),
//! password comparison is case-sensitive.

pub mod session;
pub mod token;

pub use session::{SESSION_COOKIE_NAME, SessionState, verify_session};
pub use token::{Claims, SESSION_TTL_SECS, TokenCodec, session_ttl};

use sqlx::PgPool;
use thiserror::Error;

use folio_core::Email;

use crate::db::RepositoryError;
use crate::db::admin_users::AdminUserRepository;
use crate::models::AdminUser;

/// bcrypt work factor for stored password hashes.
pub const BCRYPT_COST: u32 = 12;

/// Errors produced by the authentication layer.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair does not match a stored credential.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session cookie was presented.
    #[error("no authentication token found")]
    MissingToken,

    /// A session cookie was presented but failed verification
    /// (bad signature, expired, malformed, or wrong role).
    #[error("invalid session token")]
    InvalidToken,

    /// Signing a new token failed.
    #[error("token creation failed")]
    TokenCreation,

    /// Hashing a password failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Underlying datastore failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Authentication service over the credential store.
pub struct AuthService<'a> {
    admins: AdminUserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
        }
    }

    /// Check an email/password pair against the credential store.
    ///
    /// A malformed email, an unknown email, and a wrong password are all
    /// collapsed into `InvalidCredentials` so the response does not reveal
    /// which part was wrong.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on mismatch,
    /// `AuthError::Repository` if the datastore lookup fails.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AdminUser, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .admins
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches =
            bcrypt::verify(password, &password_hash).map_err(|_| AuthError::InvalidCredentials)?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

/// Hash a password for storage.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|_| AuthError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    // Low cost keeps the tests fast; verification is cost-agnostic.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_correct_password_verifies() {
        let hash = bcrypt::hash("correct horse battery", TEST_COST).unwrap();
        assert!(bcrypt::verify("correct horse battery", &hash).unwrap());
    }

    #[test]
    fn test_single_character_mutation_fails() {
        let hash = bcrypt::hash("correct", TEST_COST).unwrap();
        assert!(bcrypt::verify("correct", &hash).unwrap());
        assert!(!bcrypt::verify("correcT", &hash).unwrap());
        assert!(!bcrypt::verify("orrect", &hash).unwrap());
        assert!(!bcrypt::verify("correct ", &hash).unwrap());
    }

    #[test]
    fn test_password_comparison_is_case_sensitive() {
        let hash = bcrypt::hash("Correct", TEST_COST).unwrap();
        assert!(bcrypt::verify("Correct", &hash).unwrap());
        assert!(!bcrypt::verify("correct", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = bcrypt::hash("same-password", TEST_COST).unwrap();
        let b = bcrypt::hash("same-password", TEST_COST).unwrap();
        assert_ne!(a, b);
        assert!(bcrypt::verify("same-password", &a).unwrap());
        assert!(bcrypt::verify("same-password", &b).unwrap());
    }
}
