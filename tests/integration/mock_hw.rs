//! Mock adapters for integration tests.
//!
//! Records every actuator, alarm and network call so tests can assert on
//! the full command history without touching real GPIO or sockets.

use silowatch::app::events::{AppEvent, TelemetryData};
use silowatch::app::ports::{
    ActuatorPort, AlarmPort, ConnectivityPort, EventSink, NotifierPort, SensorPort, TelemetryPort,
};
use silowatch::control::alert::AlertLevel;
use silowatch::control::snapshot::RawReadings;
use silowatch::error::CommsError;

// ── MockHardware ──────────────────────────────────────────────

/// Sensor readings are whatever `next` holds; every fan command is kept.
pub struct MockHardware {
    pub next: RawReadings,
    pub fan_calls: Vec<bool>,
    pub all_off_calls: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            next: RawReadings {
                temperature_c: Some(25.0),
                humidity_pct: Some(40.0),
                gas_level: 10,
                motion_detected: false,
            },
            fan_calls: Vec::new(),
            all_off_calls: 0,
        }
    }

    pub fn set_climate(&mut self, temperature_c: Option<f32>, humidity_pct: Option<f32>) {
        self.next.temperature_c = temperature_c;
        self.next.humidity_pct = humidity_pct;
    }

    pub fn set(&mut self, humidity_pct: f32, gas_level: u16, motion_detected: bool) {
        self.next.humidity_pct = Some(humidity_pct);
        self.next.gas_level = gas_level;
        self.next.motion_detected = motion_detected;
    }

    pub fn last_fan(&self) -> Option<bool> {
        self.fan_calls.last().copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_raw(&mut self, _now_ms: u64) -> RawReadings {
        self.next
    }
}

impl ActuatorPort for MockHardware {
    fn set_fan(&mut self, on: bool) {
        self.fan_calls.push(on);
    }

    fn all_off(&mut self) {
        self.all_off_calls += 1;
    }
}

// ── MockAlarm ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockAlarm {
    pub sounded: Vec<AlertLevel>,
    pub silenced: u32,
}

impl AlarmPort for MockAlarm {
    fn sound(&mut self, level: AlertLevel) {
        self.sounded.push(level);
    }

    fn silence(&mut self) {
        self.silenced += 1;
    }
}

// ── MockNetwork ───────────────────────────────────────────────

pub struct MockNetwork {
    pub connected: bool,
    pub notify_result: Result<(), CommsError>,
    pub upload_result: Result<(), CommsError>,
    pub sent: Vec<String>,
    pub uploads: Vec<TelemetryData>,
}

#[allow(dead_code)]
impl MockNetwork {
    pub fn online() -> Self {
        Self {
            connected: true,
            notify_result: Ok(()),
            upload_result: Ok(()),
            sent: Vec::new(),
            uploads: Vec::new(),
        }
    }

    pub fn offline() -> Self {
        Self {
            connected: false,
            ..Self::online()
        }
    }
}

impl ConnectivityPort for MockNetwork {
    fn is_connected(&self) -> bool {
        self.connected
    }
}

impl NotifierPort for MockNetwork {
    fn send(&mut self, text: &str) -> Result<(), CommsError> {
        self.sent.push(text.to_owned());
        self.notify_result
    }
}

impl TelemetryPort for MockNetwork {
    fn upload(&mut self, data: &TelemetryData) -> Result<(), CommsError> {
        self.uploads.push(*data);
        self.upload_result
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
