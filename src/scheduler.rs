//! Timing gates for the two outbound actions.
//!
//! Both gates run on the loop's millisecond uptime clock and are checked
//! once per tick; neither owns a timer or a thread.
//!
//! ```text
//!   alert != Safe ──▶ NotificationGate ──(open)──▶ NotifierPort
//!                      one cooldown, all kinds
//!
//!   every tick    ──▶ TelemetryScheduler ──(due)──▶ TelemetryPort
//!                      fixed interval, missed slots dropped
//! ```
//!
//! Both are armed at boot: the first notification can leave once the
//! cooldown has elapsed since power-on, the first upload once one interval
//! has elapsed.

use log::debug;

use crate::config::{NOTIFY_COOLDOWN_MS, TELEMETRY_INTERVAL_MS};

// ═══════════════════════════════════════════════════════════════
//  Notification gate
// ═══════════════════════════════════════════════════════════════

/// Single cooldown shared by every alert kind.
///
/// Opening the gate restarts the cooldown whether or not the dispatch
/// that follows succeeds, so a failed send is retried only when the
/// cooldown next expires.
#[derive(Debug, Clone)]
pub struct NotificationGate {
    cooldown_ms: u64,
    last_sent_ms: u64,
    opened: u32,
    suppressed: u32,
}

impl NotificationGate {
    pub const fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown_ms,
            last_sent_ms: 0,
            opened: 0,
            suppressed: 0,
        }
    }

    /// True if a dispatch at `now_ms` would be allowed.
    pub fn is_open(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_sent_ms) > self.cooldown_ms
    }

    /// Claim the gate. On success the cooldown restarts at `now_ms`.
    pub fn try_open(&mut self, now_ms: u64) -> bool {
        if self.is_open(now_ms) {
            self.last_sent_ms = now_ms;
            self.opened = self.opened.saturating_add(1);
            true
        } else {
            self.suppressed = self.suppressed.saturating_add(1);
            debug!(
                "notify gate: suppressed ({} ms into {} ms cooldown)",
                now_ms.saturating_sub(self.last_sent_ms),
                self.cooldown_ms
            );
            false
        }
    }

    pub fn last_sent_ms(&self) -> u64 {
        self.last_sent_ms
    }

    /// Times the gate has opened since boot.
    pub fn opened_count(&self) -> u32 {
        self.opened
    }

    /// Alert ticks turned away by the cooldown since boot.
    pub fn suppressed_count(&self) -> u32 {
        self.suppressed
    }
}

impl Default for NotificationGate {
    fn default() -> Self {
        Self::new(NOTIFY_COOLDOWN_MS)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Telemetry scheduler
// ═══════════════════════════════════════════════════════════════

/// Fixed-interval trigger. Measured from the last *attempt*, so a slot
/// skipped for lack of network still moves the schedule forward.
#[derive(Debug, Clone)]
pub struct TelemetryScheduler {
    interval_ms: u64,
    last_attempt_ms: u64,
}

impl TelemetryScheduler {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_attempt_ms: 0,
        }
    }

    /// Returns `true` once per elapsed interval and restarts the interval
    /// at `now_ms`. Intervals that passed unobserved are not replayed.
    pub fn poll_due(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_attempt_ms) >= self.interval_ms {
            self.last_attempt_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Uptime at which the next attempt becomes due.
    pub fn next_due_ms(&self) -> u64 {
        self.last_attempt_ms + self.interval_ms
    }
}

impl Default for TelemetryScheduler {
    fn default() -> Self {
        Self::new(TELEMETRY_INTERVAL_MS)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_is_closed_for_first_cooldown_after_boot() {
        let mut gate = NotificationGate::default();
        assert!(!gate.try_open(1_000));
        assert!(!gate.try_open(60_000));
        assert!(gate.try_open(60_001));
        assert_eq!(gate.opened_count(), 1);
        assert_eq!(gate.suppressed_count(), 2);
    }

    #[test]
    fn gate_cooldown_is_strict() {
        let mut gate = NotificationGate::new(60_000);
        assert!(gate.try_open(100_000));
        assert!(!gate.try_open(160_000));
        assert!(gate.try_open(160_001));
        assert_eq!(gate.last_sent_ms(), 160_001);
    }

    #[test]
    fn gate_does_not_reopen_within_cooldown() {
        let mut gate = NotificationGate::new(60_000);
        assert!(gate.try_open(70_000));
        for t in (70_100..=130_000).step_by(100) {
            assert!(!gate.try_open(t), "reopened at {t}");
        }
    }

    #[test]
    fn telemetry_fires_every_interval() {
        let mut sched = TelemetryScheduler::default();
        assert!(!sched.poll_due(19_999));
        assert!(sched.poll_due(20_000));
        assert!(!sched.poll_due(20_100));
        assert_eq!(sched.next_due_ms(), 40_000);
        assert!(sched.poll_due(40_000));
    }

    #[test]
    fn telemetry_drops_missed_slots() {
        let mut sched = TelemetryScheduler::new(20_000);
        // A long stall spanning several intervals yields one attempt.
        assert!(sched.poll_due(95_000));
        assert!(!sched.poll_due(96_000));
        assert_eq!(sched.next_due_ms(), 115_000);
    }
}
