//! Core types for Folio.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::{AdminRole, RoleParseError};
pub use status::{PublishStatus, StatusParseError};
