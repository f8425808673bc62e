//! Admin role for authorization.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown role string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown admin role: {0}")]
pub struct RoleParseError(pub String);

/// Role of an authenticated administrator.
///
/// Folio currently has a single administrator role. The type is still an
/// enum so the session-verification role check stays an explicit comparison
/// and tokens carrying any other role string are rejected at the parse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to the admin panel.
    #[default]
    Admin,
}

impl AdminRole {
    /// Returns the canonical string form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }

    /// Parse a role from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `RoleParseError` for any string other than a known role.
    pub fn parse(s: &str) -> Result<Self, RoleParseError> {
        match s {
            "admin" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature) - stored as TEXT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for AdminRole {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for AdminRole {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for AdminRole {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        assert_eq!(AdminRole::parse("admin").unwrap(), AdminRole::Admin);
        assert_eq!(AdminRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(AdminRole::parse("editor").is_err());
        assert!(AdminRole::parse("ADMIN").is_err());
        assert!(AdminRole::parse("").is_err());
    }

    #[test]
    fn test_serde_form() {
        let json = serde_json::to_string(&AdminRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        assert!(serde_json::from_str::<AdminRole>("\"viewer\"").is_err());
    }
}
