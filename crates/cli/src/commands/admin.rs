//! Administrator account commands.
//!
//! Passwords are read from standard input rather than argv so they never
//! land in shell history or process listings. Hashing uses the same bcrypt
//! parameters as the server's login path.
//!
//! # Environment Variables
//!
//! - `FOLIO_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use std::io::{BufRead, IsTerminal, Write};

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

use folio_core::{Email, EmailError};
use folio_server::auth::{self, AuthError};
use folio_server::db::RepositoryError;
use folio_server::db::admin_users::AdminUserRepository;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 12;

/// Errors that can occur during admin account operations.
#[derive(Debug, Error)]
pub enum AdminCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Invalid email address.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation error (including duplicate email).
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Reading the password from stdin failed.
    #[error("Failed to read password: {0}")]
    PasswordRead(std::io::Error),

    /// Password does not meet the minimum length.
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    /// No account exists for the given email.
    #[error("No admin account with email: {0}")]
    NoSuchAccount(String),
}

async fn connect() -> Result<PgPool, AdminCommandError> {
    dotenvy::dotenv().ok();

    let url = std::env::var("FOLIO_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| AdminCommandError::MissingEnvVar("FOLIO_DATABASE_URL"))?;

    Ok(PgPool::connect(url.expose_secret()).await?)
}

/// Read a password from stdin (one line, trailing newline stripped).
///
/// Prompts on stderr when stdin is a terminal; stays silent when piped so
/// `echo "$PASS" | folio-cli admin create ...` works in scripts.
fn read_password() -> Result<SecretString, AdminCommandError> {
    let stdin = std::io::stdin();

    if stdin.is_terminal() {
        #[allow(clippy::print_stderr)]
        {
            eprint!("Password: ");
        }
        let _ = std::io::stderr().flush();
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .map_err(AdminCommandError::PasswordRead)?;

    let password = line.trim_end_matches(['\r', '\n']);
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AdminCommandError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(SecretString::from(password.to_owned()))
}

/// Create an administrator account.
///
/// # Errors
///
/// Returns `AdminCommandError` if the email is invalid, the password is too
/// short, an account with that email already exists, or the database is
/// unreachable.
pub async fn create(email: &str, name: &str) -> Result<(), AdminCommandError> {
    let email = Email::parse(email)?;
    let password = read_password()?;
    let password_hash = auth::hash_password(password.expose_secret())?;

    let pool = connect().await?;
    let user = AdminUserRepository::new(&pool)
        .create(&email, name, &password_hash)
        .await?;

    tracing::info!("Admin account created: id={}, email={}", user.id, user.email);
    Ok(())
}

/// Replace the password of an existing administrator account.
///
/// # Errors
///
/// Returns `AdminCommandError` if the email is invalid, the password is too
/// short, no account has that email, or the database is unreachable.
pub async fn set_password(email: &str) -> Result<(), AdminCommandError> {
    let email = Email::parse(email)?;
    let password = read_password()?;
    let password_hash = auth::hash_password(password.expose_secret())?;

    let pool = connect().await?;
    let updated = AdminUserRepository::new(&pool)
        .update_password(&email, &password_hash)
        .await?;

    if !updated {
        return Err(AdminCommandError::NoSuchAccount(email.to_string()));
    }

    tracing::info!("Password updated for {}", email);
    Ok(())
}
