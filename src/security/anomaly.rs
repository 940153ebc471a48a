//! Suspicion tracking for honeypot probes and request bursts.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::clock::Clock;
use super::identity::ClientIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnomalyPolicy {
    /// More than this many requests inside `burst_window` flags the client.
    pub burst_threshold: usize,
    pub burst_window: Duration,
    /// How long a flag survives once the client goes quiet.
    pub suspicion_ttl: Duration,
}

impl Default for AnomalyPolicy {
    fn default() -> Self {
        Self {
            burst_threshold: 20,
            burst_window: Duration::from_secs(60),
            suspicion_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

#[derive(Debug, Default)]
struct SuspicionRecord {
    flagged_at: Option<Instant>,
    recent: VecDeque<Instant>,
}

impl SuspicionRecord {
    fn prune(&mut self, now: Instant, window: Duration) {
        while self
            .recent
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) >= window)
        {
            self.recent.pop_front();
        }
    }
}

/// Tracks which identities look automated.
///
/// Flags never reject a request on their own; callers decide what a flag
/// costs the client.
#[derive(Debug)]
pub struct AnomalyFlagger {
    policy: AnomalyPolicy,
    records: DashMap<ClientIdentity, SuspicionRecord>,
    clock: Arc<dyn Clock>,
}

impl AnomalyFlagger {
    pub fn new(policy: AnomalyPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            records: DashMap::new(),
            clock,
        }
    }

    /// Flags `identity` unconditionally.
    pub fn flag(&self, identity: &ClientIdentity) {
        let now = self.clock.now();
        let mut record = self.records.entry(identity.clone()).or_default();
        record.flagged_at = Some(now);
    }

    /// Flags `identity` after it requested a honeypot path.
    pub fn record_honeypot_hit(&self, identity: &ClientIdentity) {
        self.flag(identity);
    }

    /// Records one request at the current time. See [`Self::record_burst_at`].
    pub fn record_burst(&self, identity: &ClientIdentity) -> bool {
        self.record_burst_at(identity, self.clock.now())
    }

    /// Records one request at `now`, drops timestamps that left the trailing
    /// window, and flags the identity once the window holds more than the
    /// burst threshold.
    ///
    /// Returns whether the identity is flagged after this request.
    pub fn record_burst_at(&self, identity: &ClientIdentity, now: Instant) -> bool {
        let mut record = self.records.entry(identity.clone()).or_default();

        record.recent.push_back(now);
        record.prune(now, self.policy.burst_window);

        if record.recent.len() > self.policy.burst_threshold {
            if record.flagged_at.is_none() {
                tracing::warn!(
                    identity = %identity,
                    requests = record.recent.len(),
                    "Request burst detected"
                );
            }
            record.flagged_at = Some(now);
        }

        record.flagged_at.is_some()
    }

    pub fn is_suspicious(&self, identity: &ClientIdentity) -> bool {
        self.records
            .get(identity)
            .is_some_and(|r| r.flagged_at.is_some())
    }

    /// Requests from `identity` inside the trailing window ending at `now`.
    pub fn recent_requests_at(&self, identity: &ClientIdentity, now: Instant) -> usize {
        match self.records.get_mut(identity) {
            Some(mut record) => {
                record.prune(now, self.policy.burst_window);
                record.recent.len()
            }
            None => 0,
        }
    }

    /// Prunes every record, expires idle flags older than the suspicion TTL,
    /// and drops records left with nothing in them. Returns how many records
    /// were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let window = self.policy.burst_window;
        let ttl = self.policy.suspicion_ttl;
        let before = self.records.len();

        self.records.retain(|_, record| {
            record.prune(now, window);
            if record
                .flagged_at
                .is_some_and(|t| now.saturating_duration_since(t) >= ttl)
            {
                record.flagged_at = None;
            }
            record.flagged_at.is_some() || !record.recent.is_empty()
        });

        before.saturating_sub(self.records.len())
    }

    /// Number of identities currently tracked.
    pub fn tracked(&self) -> usize {
        self.records.len()
    }
}
