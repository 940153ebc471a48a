//! Per-client fixed-window rate limiting with exponential penalty.
//!
//! Each identity owns one window `[start, end)`. Up to `limit` requests are
//! admitted inside it. Once the budget is spent, every further request inside
//! the window is rejected and pushes `end` out to
//! `now + window * 2^min(violations, max_penalty_exponent)`. When `end`
//! passes, the next request opens a fresh window with a count of one.
//!
//! The read-compare-increment step runs under the shard lock of the
//! identity's map entry, so concurrent requests from one client can never be
//! admitted past the limit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::clock::Clock;
use super::identity::ClientIdentity;

/// Limits applied to every identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Requests admitted per window. `0` disables limiting.
    pub limit: u32,
    pub window: Duration,
    /// Cap on the penalty exponent; the window never grows past `2^cap` times
    /// its base length.
    pub max_penalty_exponent: u32,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            limit: 100,
            window: Duration::from_secs(15 * 60),
            max_penalty_exponent: 5,
        }
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted { remaining: u32 },
    Rejected { retry_after: Duration },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Observable state of an identity's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// No live window; the next request opens one.
    Unseen,
    Active,
    Suspended,
}

#[derive(Debug, Clone)]
struct RateWindow {
    count: u32,
    window_start: Instant,
    window_end: Instant,
    violations: u32,
}

impl RateWindow {
    fn open(now: Instant, window: Duration) -> Self {
        Self {
            count: 1,
            window_start: now,
            window_end: deadline(now, window),
            violations: 0,
        }
    }
}

/// Upper bound for deadlines that would overflow `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// `now + delay`, clamped to a far-future instant instead of overflowing.
fn deadline(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

/// Shared rate limiter keyed by [`ClientIdentity`].
#[derive(Debug)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
    windows: DashMap<ClientIdentity, RateWindow>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            windows: DashMap::new(),
            clock,
        }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Admits or rejects one request from `identity` at the current time.
    pub fn check(&self, identity: &ClientIdentity) -> Admission {
        self.check_at(identity, self.clock.now())
    }

    /// Admits or rejects one request from `identity` at `now`.
    pub fn check_at(&self, identity: &ClientIdentity, now: Instant) -> Admission {
        let limit = self.policy.limit;
        if limit == 0 {
            return Admission::Admitted {
                remaining: u32::MAX,
            };
        }

        match self.windows.entry(identity.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(RateWindow::open(now, self.policy.window));
                Admission::Admitted {
                    remaining: limit - 1,
                }
            }
            Entry::Occupied(mut slot) => {
                let window = slot.get_mut();

                if now >= window.window_end {
                    *window = RateWindow::open(now, self.policy.window);
                    return Admission::Admitted {
                        remaining: limit - 1,
                    };
                }

                if window.count < limit {
                    window.count += 1;
                    return Admission::Admitted {
                        remaining: limit - window.count,
                    };
                }

                window.violations = window.violations.saturating_add(1);
                let penalty_end = deadline(now, self.penalty(window.violations));
                if penalty_end > window.window_end {
                    window.window_end = penalty_end;
                }

                Admission::Rejected {
                    retry_after: window.window_end - now,
                }
            }
        }
    }

    fn penalty(&self, violations: u32) -> Duration {
        let exponent = violations.min(self.policy.max_penalty_exponent).min(31);
        self.policy.window.saturating_mul(1u32 << exponent)
    }

    /// Reports the state of `identity` at `now` without recording a request.
    pub fn state_at(&self, identity: &ClientIdentity, now: Instant) -> WindowState {
        match self.windows.get(identity) {
            None => WindowState::Unseen,
            Some(w) if now >= w.window_end => WindowState::Unseen,
            Some(w) if w.violations > 0 => WindowState::Suspended,
            Some(_) => WindowState::Active,
        }
    }

    /// Number of requests counted in the identity's live window.
    pub fn count_at(&self, identity: &ClientIdentity, now: Instant) -> u32 {
        self.windows
            .get(identity)
            .filter(|w| now >= w.window_start && now < w.window_end)
            .map(|w| w.count)
            .unwrap_or(0)
    }

    /// Drops windows that ended at or before `now`. Returns how many were
    /// removed.
    ///
    /// A suspended identity's window always ends in the future, so it is
    /// retained until its penalty runs out.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, w| w.window_end > now);
        before.saturating_sub(self.windows.len())
    }

    /// Number of identities currently tracked.
    pub fn tracked(&self) -> usize {
        self.windows.len()
    }
}

/// Rounds a retry delay up to whole seconds for the `Retry-After` header.
pub fn retry_after_secs(retry_after: Duration) -> u64 {
    retry_after.as_millis().div_ceil(1000).try_into().unwrap_or(u64::MAX)
}
