//! # Monitor State
//!
//! The monitor's whole memory is one boolean, "has pending orders", plus when
//! it last checked. [`MonitorState`] holds both. Only the actor owns it, and it
//! changes only when a poll finishes.

use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::Instant;

/// Change of the pending flag between two completed polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transition {
    /// false → true: alert, sound and badge.
    Raised,
    /// true → true: badge count refresh only.
    Refreshed,
    /// true → false: badge removed.
    Cleared,
    /// false → false: nothing visible.
    Quiet,
}

impl Transition {
    pub fn between(was_pending: bool, is_pending: bool) -> Self {
        match (was_pending, is_pending) {
            (false, true) => Transition::Raised,
            (true, true) => Transition::Refreshed,
            (true, false) => Transition::Cleared,
            (false, false) => Transition::Quiet,
        }
    }
}

/// Why a poll ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PollTrigger {
    Startup,
    Interval,
    Visibility,
    Manual,
}

/// Outcome of one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PollReport {
    /// No admin token. Nothing was requested and nothing changed.
    Skipped,
    Completed { pending: usize, transition: Transition },
    /// The request or the body failed. The pending flag kept its old value.
    Failed { reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    has_pending_orders: bool,
    pending_count: usize,
    last_check: Option<Instant>,
    last_check_ms: Option<u64>,
    polls: u64,
    consecutive_failures: u32,
}

impl MonitorState {
    pub fn has_pending_orders(&self) -> bool {
        self.has_pending_orders
    }

    pub fn pending_count(&self) -> usize {
        self.pending_count
    }

    pub fn last_check(&self) -> Option<Instant> {
        self.last_check
    }

    /// Records that a poll was attempted, whatever its outcome.
    pub fn mark_checked(&mut self, now: Instant) {
        self.last_check = Some(now);
        self.last_check_ms = Some(epoch_millis());
        self.polls += 1;
    }

    /// Stores the result of a completed poll and returns the flag transition.
    pub fn apply_count(&mut self, pending: usize) -> Transition {
        let is_pending = pending > 0;
        let transition = Transition::between(self.has_pending_orders, is_pending);
        self.has_pending_orders = is_pending;
        self.pending_count = pending;
        self.consecutive_failures = 0;
        transition
    }

    pub fn record_failure(&mut self) {
        self.consecutive_failures += 1;
    }

    /// True if no poll happened yet or the last one is older than `threshold`.
    pub fn is_stale(&self, now: Instant, threshold: Duration) -> bool {
        match self.last_check {
            Some(at) => now.saturating_duration_since(at) > threshold,
            None => true,
        }
    }

    pub fn snapshot(&self, alert_id: Option<u64>) -> MonitorSnapshot {
        MonitorSnapshot {
            has_pending_orders: self.has_pending_orders,
            pending_count: self.pending_count,
            last_check_ms: self.last_check_ms,
            polls: self.polls,
            consecutive_failures: self.consecutive_failures,
            alert_id,
        }
    }
}

/// Point-in-time copy of the monitor state, safe to hand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorSnapshot {
    pub has_pending_orders: bool,
    pub pending_count: usize,
    /// Wall-clock time of the last attempted poll, in epoch milliseconds.
    pub last_check_ms: Option<u64>,
    pub polls: u64,
    pub consecutive_failures: u32,
    /// Id of the alert currently shown, if any.
    pub alert_id: Option<u64>,
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
