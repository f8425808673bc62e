//! Request middleware: the admin auth gate and the login rate limiter.

pub mod auth;
pub mod rate_limit;

pub use auth::RequireAdmin;
pub use rate_limit::{Decision, InMemoryRateLimitStore, RateLimitStore};
