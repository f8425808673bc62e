//! Publication status for content entities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown status string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown publish status: {0}")]
pub struct StatusParseError(pub String);

/// Lifecycle status of a piece of content.
///
/// Posts move `Draft -> Scheduled -> Published`; `Scheduled` entries are
/// promoted by the background publisher once their scheduled time passes.
/// `Archived` content is hidden from the public site but kept in the
/// datastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl PublishStatus {
    /// Returns the canonical string form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Parse a status from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `StatusParseError` for any string other than a known status.
    pub fn parse(s: &str) -> Result<Self, StatusParseError> {
        match s {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(StatusParseError(other.to_owned())),
        }
    }

    /// Whether content with this status is visible on the public site.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Published)
    }
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PublishStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature) - stored as TEXT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PublishStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PublishStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PublishStatus {
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
        for status in [
            PublishStatus::Draft,
            PublishStatus::Scheduled,
            PublishStatus::Published,
            PublishStatus::Archived,
        ] {
            assert_eq!(PublishStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(PublishStatus::parse("live").is_err());
        assert!(PublishStatus::parse("Draft").is_err());
    }

    #[test]
    fn test_only_published_is_public() {
        assert!(PublishStatus::Published.is_public());
        assert!(!PublishStatus::Draft.is_public());
        assert!(!PublishStatus::Scheduled.is_public());
        assert!(!PublishStatus::Archived.is_public());
    }

    #[test]
    fn test_serde_form() {
        let json = serde_json::to_string(&PublishStatus::Scheduled).unwrap();
        assert_eq!(json, "\"scheduled\"");
    }
}
