//! Admin user repository.
//!
//! The credential store of the system. Password hashes are only ever read
//! through `get_with_password_hash`; every other query leaves them in the
//! database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use folio_core::{AdminRole, AdminUserId, Email};

use super::{RepositoryError, map_unique_violation};
use crate::models::AdminUser;

/// Private row including the password hash.
#[derive(sqlx::FromRow)]
struct AdminUserRow {
    id: AdminUserId,
    email: Email,
    name: String,
    role: AdminRole,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminUserRow {
    fn split(self) -> (AdminUser, String) {
        (
            AdminUser {
                id: self.id,
                email: self.email,
                name: self.name,
                role: self.role,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            self.password_hash,
        )
    }
}

/// Repository for admin user database operations.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an admin user by email.
    ///
    /// Email values are stored lowercased, and `Email` normalizes at parse
    /// time, so plain equality here is a case-insensitive lookup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<AdminUser>, RepositoryError> {
        let user = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, name, role, created_at, updated_at
             FROM admin_users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get an admin user together with their stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            "SELECT id, email, name, role, password_hash, created_at, updated_at
             FROM admin_users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(AdminUserRow::split))
    }

    /// Get an admin user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AdminUserId) -> Result<Option<AdminUser>, RepositoryError> {
        let user = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, name, role, created_at, updated_at
             FROM admin_users
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new admin user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError> {
        let user = sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (email, name, role, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING id, email, name, role, created_at, updated_at",
        )
        .bind(email)
        .bind(name)
        .bind(AdminRole::Admin)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "admin email"))?;

        Ok(user)
    }

    /// Replace the stored password hash for an account.
    ///
    /// Returns `true` if an account with that email existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_password(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE admin_users
             SET password_hash = $2, updated_at = now()
             WHERE email = $1",
        )
        .bind(email)
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
