//! Administrator account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::{AdminRole, AdminUserId, Email};

/// An administrator account row.
///
/// The password hash is deliberately not part of this struct; it is fetched
/// separately by the credential check and never leaves the auth layer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated principal as embedded in a session token.
///
/// This is the snapshot taken at login time. The authoritative copy is the
/// `admin_users` row; a token's embedded copy may drift from it until the
/// token expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
}

impl From<&AdminUser> for AdminIdentity {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}
