use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub const RATE_LIMIT: u32 = 5;
pub const RATE_WINDOW: Duration = Duration::from_secs(60);

/// Identifier used when the request carries no forwarded address.
const FALLBACK_CLIENT_ID: &str = "anonymous";

struct RateRecord {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window request counter keyed by client identifier.
///
/// A burst straddling a window boundary can admit up to twice the quota in a
/// short span; that is the accepted cost of the fixed window. Stale identifiers
/// are never evicted, so the map grows for the life of the process — a known
/// scaling boundary for multi-instance deployments, where this would move to a
/// shared store with expiring keys.
pub struct RateLimiter {
    records: Mutex<HashMap<String, RateRecord>>,
    quota: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(RATE_LIMIT, RATE_WINDOW)
    }

    pub fn with_limits(quota: u32, window: Duration) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            quota,
            window,
        }
    }

    pub fn allow(&self, client_id: &str) -> bool {
        self.allow_at(client_id, Instant::now())
    }

    fn allow_at(&self, client_id: &str, now: Instant) -> bool {
        // The limiter is advisory; a poisoned lock must not take the process
        // down with it.
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        let record = records.entry(client_id.to_string()).or_insert(RateRecord {
            count: 0,
            reset_at: now + self.window,
        });

        // Window elapsed: start a fresh one.
        if now > record.reset_at {
            record.count = 1;
            record.reset_at = now + self.window;
            return true;
        }

        if record.count >= self.quota {
            return false;
        }
        record.count += 1;
        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let client_id = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').map(str::trim).find(|ip| !ip.is_empty()))
        .unwrap_or(FALLBACK_CLIENT_ID)
        .to_string();

    if !limiter.allow(&client_id) {
        return AppError::RateLimited.into_response();
    }

    next.run(req).await
}
