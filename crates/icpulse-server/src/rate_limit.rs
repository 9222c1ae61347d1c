//! Blanket per-IP rate limiter
//!
//! Fixed window, 3 requests per minute per client IP, applied to the whole
//! service rather than per command.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::warn;

const MAX_REQUESTS: u32 = 3;
const WINDOW: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    hits: Arc<Mutex<HashMap<IpAddr, (Instant, u32)>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_policy(MAX_REQUESTS, WINDOW)
    }

    pub fn with_policy(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record a hit for the ip and report whether it is still within budget.
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap();

        let entry = hits.entry(ip).or_insert((now, 0));
        if now.duration_since(entry.0) >= self.window {
            *entry = (now, 0);
        }
        entry.1 += 1;
        entry.1 <= self.max_requests
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    if !limiter.check(addr.ip()) {
        warn!(ip = %addr.ip(), "rate limit exceeded");
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests, please slow down".to_string(),
        ));
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([127, 0, 0, last])
    }

    #[test]
    fn allows_up_to_limit_then_blocks() {
        let limiter = RateLimiter::with_policy(3, Duration::from_secs(60));
        assert!(limiter.check(ip(1)));
        assert!(limiter.check(ip(1)));
        assert!(limiter.check(ip(1)));
        assert!(!limiter.check(ip(1)));
    }

    #[test]
    fn limits_are_per_ip() {
        let limiter = RateLimiter::with_policy(1, Duration::from_secs(60));
        assert!(limiter.check(ip(1)));
        assert!(!limiter.check(ip(1)));
        assert!(limiter.check(ip(2)));
    }

    #[test]
    fn window_resets() {
        let limiter = RateLimiter::with_policy(1, Duration::from_millis(0));
        assert!(limiter.check(ip(1)));
        // Zero-length window: every request starts a fresh window.
        assert!(limiter.check(ip(1)));
    }
}
