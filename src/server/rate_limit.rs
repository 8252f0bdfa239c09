//! Per-client fixed-window rate limiting.
//!
//! Each client IP gets a counter that resets when its window expires. Once a
//! client has used up its allowance, further requests in the same window are
//! rejected with `429 Too Many Requests` and a `Retry-After` header.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::api::ErrorResponse;
use super::AppState;

/// Response header carrying the requests left in the client's window.
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Client count above which expired windows are swept on the next check.
const PRUNE_THRESHOLD: usize = 10_000;

/// Result of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request may proceed.
    Allowed {
        /// Requests left in the current window.
        remaining: u32,
    },
    /// The client has exhausted its window.
    Limited {
        /// Time until the window resets.
        retry_after: Duration,
    },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
struct Clients {
    windows: HashMap<IpAddr, Window>,
    /// Map size that triggers the next sweep of expired windows.
    sweep_at: usize,
    sweeps: u64,
}

/// Fixed-window request counter keyed by client IP.
///
/// Expired windows are swept once the map outgrows `sweep_at`. After a sweep
/// the trigger moves to twice the surviving size.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    clients: Mutex<Clients>,
}

impl FixedWindowLimiter {
    /// Creates a limiter allowing `limit` requests per client per `window`.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            clients: Mutex::new(Clients {
                windows: HashMap::new(),
                sweep_at: PRUNE_THRESHOLD,
                sweeps: 0,
            }),
        }
    }

    /// Counts a request from `client` against its current window.
    pub fn check(&self, client: IpAddr) -> Decision {
        self.check_at(client, Instant::now())
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    pub fn check_at(&self, client: IpAddr, now: Instant) -> Decision {
        // A poisoned lock only means another request panicked mid-update;
        // the counters are still usable.
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());

        if clients.windows.len() > clients.sweep_at {
            let window = self.window;
            clients
                .windows
                .retain(|_, w| now.saturating_duration_since(w.started) < window);
            clients.sweep_at = PRUNE_THRESHOLD.max(clients.windows.len().saturating_mul(2));
            clients.sweeps += 1;
        }

        let entry = clients.windows.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.limit {
            return Decision::Limited {
                retry_after: self.window - now.saturating_duration_since(entry.started),
            };
        }

        entry.count += 1;
        Decision::Allowed {
            remaining: self.limit - entry.count,
        }
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .windows
            .len()
    }

    #[cfg(test)]
    fn sweeps(&self) -> u64 {
        self.clients.lock().unwrap_or_else(|e| e.into_inner()).sweeps
    }
}

/// Middleware that applies the shared limiter to every request.
///
/// The client is identified by the peer address from
/// [`ConnectInfo`]; requests without one share a single bucket.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = client_ip(&request);

    match state.limiter.check(client) {
        Decision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert(X_RATELIMIT_REMAINING, HeaderValue::from(remaining));
            response
        }
        Decision::Limited { retry_after } => {
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            let secs = secs.max(1);
            tracing::warn!(client = %client, retry_after_secs = secs, "rate limit exceeded");

            let mut response = ErrorResponse::new(
                StatusCode::TOO_MANY_REQUESTS,
                "too many requests, please try again later",
            )
            .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
            response
        }
    }
}

fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT_A: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const CLIENT_B: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();

        assert_eq!(limiter.check_at(CLIENT_A, now), Decision::Allowed { remaining: 2 });
        assert_eq!(limiter.check_at(CLIENT_A, now), Decision::Allowed { remaining: 1 });
        assert_eq!(limiter.check_at(CLIENT_A, now), Decision::Allowed { remaining: 0 });
        assert!(matches!(
            limiter.check_at(CLIENT_A, now),
            Decision::Limited { .. }
        ));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(matches!(limiter.check_at(CLIENT_A, now), Decision::Allowed { .. }));
        assert!(matches!(limiter.check_at(CLIENT_A, now), Decision::Limited { .. }));
        assert!(matches!(limiter.check_at(CLIENT_B, now), Decision::Allowed { .. }));
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn test_window_resets() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();

        assert!(matches!(limiter.check_at(CLIENT_A, start), Decision::Allowed { .. }));
        assert!(matches!(
            limiter.check_at(CLIENT_A, start + Duration::from_secs(59)),
            Decision::Limited { .. }
        ));
        assert_eq!(
            limiter.check_at(CLIENT_A, start + Duration::from_secs(60)),
            Decision::Allowed { remaining: 0 }
        );
    }

    #[test]
    fn test_retry_after_counts_down() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        limiter.check_at(CLIENT_A, start);

        assert_eq!(
            limiter.check_at(CLIENT_A, start + Duration::from_secs(20)),
            Decision::Limited {
                retry_after: Duration::from_secs(40)
            }
        );
    }

    #[test]
    fn test_rejected_requests_do_not_extend_window() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();
        limiter.check_at(CLIENT_A, start);

        for secs in 1..10 {
            limiter.check_at(CLIENT_A, start + Duration::from_secs(secs));
        }
        assert!(matches!(
            limiter.check_at(CLIENT_A, start + Duration::from_secs(10)),
            Decision::Allowed { .. }
        ));
    }

    #[test]
    fn test_expired_windows_are_pruned() {
        let limiter = FixedWindowLimiter::new(5, Duration::from_secs(1));
        let start = Instant::now();

        for i in 0..=PRUNE_THRESHOLD as u32 {
            limiter.check_at(IpAddr::V4(Ipv4Addr::from(i)), start);
        }
        assert_eq!(limiter.tracked_clients(), PRUNE_THRESHOLD + 1);

        limiter.check_at(CLIENT_A, start + Duration::from_secs(2));
        assert_eq!(limiter.tracked_clients(), 1);
        assert_eq!(limiter.sweeps(), 1);
    }

    #[test]
    fn test_live_clients_do_not_trigger_repeated_sweeps() {
        let limiter = FixedWindowLimiter::new(5, Duration::from_secs(60));
        let start = Instant::now();

        for i in 0..=PRUNE_THRESHOLD as u32 {
            limiter.check_at(IpAddr::V4(Ipv4Addr::from(i)), start);
        }
        assert_eq!(limiter.sweeps(), 0);

        // Nothing has expired, so the sweep keeps every client
        limiter.check_at(CLIENT_A, start + Duration::from_secs(1));
        assert_eq!(limiter.sweeps(), 1);
        assert_eq!(limiter.tracked_clients(), PRUNE_THRESHOLD + 2);

        for secs in 2..50 {
            limiter.check_at(CLIENT_B, start + Duration::from_secs(secs));
        }
        assert_eq!(limiter.sweeps(), 1);
    }
}
