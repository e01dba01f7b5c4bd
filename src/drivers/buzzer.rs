//! Buzzer pattern engine and alarm drivers.
//!
//! Each [`AlertLevel`] maps to a short table of [`Phase`]s. The
//! [`BuzzerPattern`] state machine walks that table against a millisecond
//! clock: `start()` returns the first output level, `advance()` returns a
//! new level whenever a phase deadline passes. The output of the last
//! phase is held once the pattern finishes.
//!
//! | Level        | Phases              | Blocking time |
//! |--------------|---------------------|---------------|
//! | Spoilage     | ON (held)           | 0 ms          |
//! | HighHumidity | ON 300, OFF 300     | 600 ms        |
//! | Intruder     | ON 150, OFF 150     | 300 ms        |
//! | Safe         | OFF                 | 0 ms          |
//!
//! [`BlockingAlarm`] sleeps until each deadline, so a call to
//! [`AlarmPort::sound`] returns only once the pattern is complete. A
//! non-blocking driver can poll the same state machine from the loop.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::AlarmPort;
use crate::control::alert::AlertLevel;

/// One step of a buzzer pattern. A zero duration ends the pattern
/// immediately and leaves the output at `on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub on: bool,
    pub duration_ms: u32,
}

const HOLD_ON: &[Phase] = &[Phase { on: true, duration_ms: 0 }];
const SLOW_BEEP: &[Phase] = &[
    Phase { on: true, duration_ms: 300 },
    Phase { on: false, duration_ms: 300 },
];
const FAST_BEEP: &[Phase] = &[
    Phase { on: true, duration_ms: 150 },
    Phase { on: false, duration_ms: 150 },
];
const SILENT: &[Phase] = &[Phase { on: false, duration_ms: 0 }];

/// Phase table for an alert level.
pub fn phases_for(level: AlertLevel) -> &'static [Phase] {
    match level {
        AlertLevel::Spoilage => HOLD_ON,
        AlertLevel::HighHumidity => SLOW_BEEP,
        AlertLevel::Intruder => FAST_BEEP,
        AlertLevel::Safe => SILENT,
    }
}

/// Total time a pattern keeps the buzzer busy.
pub fn pattern_duration_ms(level: AlertLevel) -> u32 {
    phases_for(level).iter().map(|p| p.duration_ms).sum()
}

/// Timer-driven pattern state machine. Stack-allocated, no heap.
#[derive(Debug, Clone)]
pub struct BuzzerPattern {
    phases: &'static [Phase],
    phase: usize,
    phase_deadline_ms: u64,
}

impl BuzzerPattern {
    pub const fn new() -> Self {
        Self {
            phases: SILENT,
            phase: SILENT.len(),
            phase_deadline_ms: 0,
        }
    }

    /// Begin the pattern for `level` at `now_ms`. Returns the output level
    /// to apply immediately.
    pub fn start(&mut self, level: AlertLevel, now_ms: u64) -> bool {
        self.phases = phases_for(level);
        self.phase = 0;
        let first = self.phases[0];
        self.phase_deadline_ms = now_ms + u64::from(first.duration_ms);
        first.on
    }

    /// Move past every phase whose deadline has elapsed. Returns the new
    /// output level if a new phase was entered.
    pub fn advance(&mut self, now_ms: u64) -> Option<bool> {
        let mut output = None;
        while !self.is_finished() && now_ms >= self.phase_deadline_ms {
            self.phase += 1;
            if let Some(next) = self.phases.get(self.phase) {
                // Deadlines chain from the previous one so late polls don't drift.
                self.phase_deadline_ms += u64::from(next.duration_ms);
                output = Some(next.on);
            }
        }
        output
    }

    /// Milliseconds until the current phase ends, or `None` once finished.
    pub fn time_to_next(&self, now_ms: u64) -> Option<u32> {
        if self.is_finished() {
            return None;
        }
        Some(self.phase_deadline_ms.saturating_sub(now_ms) as u32)
    }

    pub fn is_finished(&self) -> bool {
        self.phase >= self.phases.len()
    }
}

impl Default for BuzzerPattern {
    fn default() -> Self {
        Self::new()
    }
}

/// Alarm that renders each pattern synchronously, blocking the caller.
pub struct BlockingAlarm<P, D> {
    pin: P,
    delay: D,
    pattern: BuzzerPattern,
    /// Local millisecond clock advanced by the delays this driver issues.
    clock_ms: u64,
}

impl<P: OutputPin, D: DelayNs> BlockingAlarm<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            pattern: BuzzerPattern::new(),
            clock_ms: 0,
        }
    }

    fn drive(&mut self, on: bool) {
        if self.pin.set_state(PinState::from(on)).is_err() {
            warn!("buzzer: pin write failed");
        }
    }
}

impl<P: OutputPin, D: DelayNs> AlarmPort for BlockingAlarm<P, D> {
    fn sound(&mut self, level: AlertLevel) {
        let on = self.pattern.start(level, self.clock_ms);
        self.drive(on);
        while let Some(wait_ms) = self.pattern.time_to_next(self.clock_ms) {
            if wait_ms > 0 {
                self.delay.delay_ms(wait_ms);
                self.clock_ms += u64::from(wait_ms);
            }
            if let Some(on) = self.pattern.advance(self.clock_ms) {
                self.drive(on);
            }
        }
    }

    fn silence(&mut self) {
        self.pattern = BuzzerPattern::new();
        self.drive(false);
    }
}
