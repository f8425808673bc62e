//! Login rate limiting.
//!
//! The limiter is an injected capability: call sites only see the
//! [`RateLimitStore`] trait, so a multi-instance deployment can swap the
//! process-local counter for a shared one without touching them. The
//! in-memory implementation is a best-effort, single-process counter -
//! explicitly inadequate once more than one instance serves logins.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Maximum login attempts per IP per window.
pub const LOGIN_MAX_ATTEMPTS: u32 = 10;

/// Length of the rolling login window.
pub const LOGIN_WINDOW: Duration = Duration::from_secs(60);

/// How often stale windows are swept out of the store.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Verdict for a single request against the limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Limited,
}

/// A bounded per-key request counter with TTL eviction.
pub trait RateLimitStore: Send + Sync {
    /// Count one request against `key` and decide whether it may proceed.
    fn increment(&self, key: &str) -> Decision;

    /// Forget everything recorded for `key`.
    fn reset(&self, key: &str);

    /// Evict entries whose window has lapsed.
    fn sweep(&self);
}

#[derive(Debug)]
struct Window {
    count: u32,
    resets_at: Instant,
}

/// Process-local [`RateLimitStore`] backed by a mutexed map.
pub struct InMemoryRateLimitStore {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimitStore {
    /// Create a store allowing `max_requests` per `window` per key.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn increment(&self, key: &str) -> Decision {
        let now = Instant::now();
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            // A poisoned lock means a panic mid-update; failing open here
            // would disable the limiter entirely, so take the map as-is.
            Err(poisoned) => poisoned.into_inner(),
        };

        let window = entries.entry(key.to_owned()).or_insert(Window {
            count: 0,
            resets_at: now + self.window,
        });

        if now >= window.resets_at {
            window.count = 0;
            window.resets_at = now + self.window;
        }

        window.count += 1;
        if window.count > self.max_requests {
            Decision::Limited
        } else {
            Decision::Allowed
        }
    }

    fn reset(&self, key: &str) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.remove(key);
    }

    fn sweep(&self) {
        let now = Instant::now();
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.retain(|_, window| window.resets_at > now);
    }
}

/// Axum middleware limiting login attempts per client IP.
///
/// # Errors
///
/// Returns `AppError::RateLimited` (429) once the window is exhausted.
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = client_ip(request.headers());

    match state.rate_limiter().increment(&key) {
        Decision::Allowed => Ok(next.run(request).await),
        Decision::Limited => {
            tracing::warn!(client = %key, "login rate limit exceeded");
            Err(AppError::RateLimited)
        }
    }
}

/// Extract the client IP from proxy headers.
///
/// Checks `X-Forwarded-For` (first hop), then `X-Real-IP`, then
/// `Fly-Client-IP`. Falls back to a shared bucket when nothing identifies
/// the client - acceptable for a single-process deployment behind a proxy
/// that always sets one of these.
fn client_ip(headers: &HeaderMap) -> String {
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return ip.to_owned();
    }

    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return ip.to_owned();
    }

    if let Some(ip) = headers
        .get("fly-client-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return ip.to_owned();
    }

    "unknown".to_owned()
}

/// Spawn the background task that periodically sweeps stale windows.
pub fn spawn_sweeper(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            state.rate_limiter().sweep();
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit() {
        let store = InMemoryRateLimitStore::new(3, Duration::from_secs(60));
        assert_eq!(store.increment("1.2.3.4"), Decision::Allowed);
        assert_eq!(store.increment("1.2.3.4"), Decision::Allowed);
        assert_eq!(store.increment("1.2.3.4"), Decision::Allowed);
        assert_eq!(store.increment("1.2.3.4"), Decision::Limited);
        assert_eq!(store.increment("1.2.3.4"), Decision::Limited);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = InMemoryRateLimitStore::new(1, Duration::from_secs(60));
        assert_eq!(store.increment("1.2.3.4"), Decision::Allowed);
        assert_eq!(store.increment("1.2.3.4"), Decision::Limited);
        assert_eq!(store.increment("5.6.7.8"), Decision::Allowed);
    }

    #[test]
    fn test_window_expiry_resets_count() {
        let store = InMemoryRateLimitStore::new(1, Duration::from_millis(20));
        assert_eq!(store.increment("1.2.3.4"), Decision::Allowed);
        assert_eq!(store.increment("1.2.3.4"), Decision::Limited);

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(store.increment("1.2.3.4"), Decision::Allowed);
    }

    #[test]
    fn test_reset_clears_key() {
        let store = InMemoryRateLimitStore::new(1, Duration::from_secs(60));
        assert_eq!(store.increment("1.2.3.4"), Decision::Allowed);
        assert_eq!(store.increment("1.2.3.4"), Decision::Limited);

        store.reset("1.2.3.4");
        assert_eq!(store.increment("1.2.3.4"), Decision::Allowed);
    }

    #[test]
    fn test_sweep_evicts_only_stale_windows() {
        let store = InMemoryRateLimitStore::new(5, Duration::from_millis(20));
        store.increment("stale");
        std::thread::sleep(Duration::from_millis(30));
        store.increment("fresh");

        store.sweep();

        let entries = store.entries.lock().unwrap();
        assert!(!entries.contains_key("stale"));
        assert!(entries.contains_key("fresh"));
    }

    #[test]
    fn test_client_ip_header_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "9.9.9.9, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "8.8.8.8".parse().unwrap());
        assert_eq!(client_ip(&headers), "9.9.9.9");

        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "8.8.8.8".parse().unwrap());
        assert_eq!(client_ip(&headers), "8.8.8.8");

        let mut headers = HeaderMap::new();
        headers.insert("fly-client-ip", "7.7.7.7".parse().unwrap());
        assert_eq!(client_ip(&headers), "7.7.7.7");

        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }
}
