//! Circuit breaker for market-data rate limiting and IP bans.
//!
//! Binance answers with HTTP 429 once the request weight is exceeded and with
//! 418 after an IP has been auto-banned; its WAF may also answer 403. Three
//! consecutive failures open the breaker for the default cooldown. A ban opens
//! it immediately, for at least as long as the server's `Retry-After` says.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// State of the circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Normal operation, requests are allowed.
    Closed,
    /// Tripped: all requests are refused until `until`.
    Open { until: Instant },
}

#[derive(Debug)]
struct Inner {
    state: BreakerState,
    consecutive_failures: u32,
}

/// Circuit breaker that stops hammering a provider after a ban or rate limit.
///
/// Shared between sources through an `Arc`.
#[derive(Debug)]
pub struct CircuitBreaker {
    inner: Mutex<Inner>,
    cooldown: Duration,
    failure_threshold: u32,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with the given cooldown duration.
    pub fn new(cooldown: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: BreakerState::Closed,
                consecutive_failures: 0,
            }),
            cooldown,
            failure_threshold: 3,
        }
    }

    /// Default circuit breaker: 2-minute cooldown, opens after 3 consecutive failures.
    pub fn default_provider() -> Self {
        Self::new(Duration::from_secs(2 * 60))
    }

    // A poisoned lock only means another thread panicked mid-update; the
    // counters are still meaningful.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check if requests are currently allowed. Closes an expired breaker.
    pub fn is_allowed(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            BreakerState::Closed => true,
            BreakerState::Open { until } if Instant::now() >= until => {
                inner.state = BreakerState::Closed;
                inner.consecutive_failures = 0;
                true
            }
            BreakerState::Open { .. } => false,
        }
    }

    /// Record a successful request; resets the failure counter.
    pub fn record_success(&self) {
        self.lock().consecutive_failures = 0;
    }

    /// Record a failure; opens the breaker once the threshold is reached.
    pub fn record_failure(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures += 1;
        if inner.consecutive_failures >= self.failure_threshold {
            log::warn!(
                "circuit breaker open after {} consecutive failures",
                inner.consecutive_failures
            );
            inner.state = BreakerState::Open {
                until: Instant::now() + self.cooldown,
            };
        }
    }

    /// Open immediately for the default cooldown.
    pub fn trip(&self) {
        self.trip_for(self.cooldown);
    }

    /// Open immediately for `max(ban, cooldown)` (418 / 403 with `Retry-After`).
    pub fn trip_for(&self, ban: Duration) {
        let hold = ban.max(self.cooldown);
        log::warn!("circuit breaker tripped; refusing requests for {hold:?}");
        self.lock().state = BreakerState::Open {
            until: Instant::now() + hold,
        };
    }

    /// Remaining cooldown time (zero if closed).
    pub fn remaining_cooldown(&self) -> Duration {
        match self.lock().state {
            BreakerState::Closed => Duration::ZERO,
            BreakerState::Open { until } => until.saturating_duration_since(Instant::now()),
        }
    }
}
