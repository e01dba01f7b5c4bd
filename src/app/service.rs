//! Application service — the hexagonal core.
//!
//! [`SiloService`] owns the [`ControlLoopState`] and runs one control
//! cycle per [`tick`](SiloService::tick). All I/O flows through port
//! traits injected at call sites, making the entire service testable
//! with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                  │        SiloService        │
//! ActuatorPort ◀── │  fuse · fan · alert       │ ──▶ AlarmPort
//!                  │  notify gate · telemetry  │ ──▶ NotifierPort / TelemetryPort
//!                  └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::control::alert::{self, AlertLevel};
use crate::control::fan::fan_demand;

use super::events::{AppEvent, TelemetryData};
use super::ports::{
    ActuatorPort, AlarmPort, ConnectivityPort, EventSink, NotifierPort, SensorPort, TelemetryPort,
};
use super::state::ControlLoopState;

// ───────────────────────────────────────────────────────────────
// SiloService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct SiloService {
    state: ControlLoopState,
}

impl SiloService {
    /// Fresh state: fan off, `Safe`, both gates armed at uptime zero.
    pub fn new() -> Self {
        Self {
            state: ControlLoopState::default(),
        }
    }

    /// Construct around a prepared state (tests, custom gate timings).
    pub fn with_state(state: ControlLoopState) -> Self {
        Self { state }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force every actuator to its safe state and announce the start.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        self.state.fan_running = false;
        sink.emit(&AppEvent::Started);
        info!("SiloService started, fan off");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle at uptime `now_ms`:
    /// acquire → fan → resolve → alarm → notify → telemetry.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], and `net` all three network ports — this avoids
    /// double mutable borrows while keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        alarm: &mut impl AlarmPort,
        net: &mut (impl ConnectivityPort + NotifierPort + TelemetryPort),
        sink: &mut impl EventSink,
    ) {
        self.state.tick_count += 1;

        // 1. Acquire. A failed climate read keeps the previous value.
        let raw = hw.read_raw(now_ms);
        let held = self.state.snapshot.apply(raw);
        if held.any() {
            debug!(
                "climate read failed, holding T={:.1} H={:.1}",
                self.state.snapshot.temperature_c, self.state.snapshot.humidity_pct
            );
        }
        let snap = self.state.snapshot;

        // 2. Fan
        let fan_on = fan_demand(&snap);
        hw.set_fan(fan_on);
        if fan_on != self.state.fan_running {
            self.state.fan_running = fan_on;
            sink.emit(&AppEvent::FanChanged { on: fan_on });
        }

        // 3. Resolve
        let level = alert::resolve(&snap);
        if level != self.state.alert {
            sink.emit(&AppEvent::AlertChanged {
                from: self.state.alert,
                to: level,
            });
            self.state.alert = level;
        }

        // 4. Alarm (may block for the pattern length)
        alarm.sound(level);

        // 5. Notify
        if level.is_alarm() && self.state.gate.try_open(now_ms) {
            self.dispatch_notification(level, net, sink);
        }

        // 6. Telemetry
        if self.state.telemetry.poll_due(now_ms) {
            self.upload_telemetry(net, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Point-in-time view for the uplink, dashboard and logs.
    pub fn build_telemetry(&self) -> TelemetryData {
        let snap = &self.state.snapshot;
        TelemetryData {
            temperature_c: snap.temperature_c,
            humidity_pct: snap.humidity_pct,
            gas_level: snap.gas_level,
            motion_detected: snap.motion_detected,
            fan_running: self.state.fan_running,
            alert: self.state.alert,
        }
    }

    pub fn state(&self) -> &ControlLoopState {
        &self.state
    }

    pub fn alert(&self) -> AlertLevel {
        self.state.alert
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.state.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn dispatch_notification(
        &mut self,
        level: AlertLevel,
        net: &mut (impl ConnectivityPort + NotifierPort),
        sink: &mut impl EventSink,
    ) {
        let Some(text) = level.notification_text() else {
            return;
        };
        if !net.is_connected() {
            debug!("notify: link down, {level} not sent");
            sink.emit(&AppEvent::NotificationSkipped(level));
            return;
        }
        match net.send(text) {
            Ok(()) => sink.emit(&AppEvent::NotificationSent(level)),
            Err(e) => {
                warn!("notify: {level} failed: {e}");
                sink.emit(&AppEvent::NotificationFailed(level, e));
            }
        }
    }

    fn upload_telemetry(
        &mut self,
        net: &mut (impl ConnectivityPort + TelemetryPort),
        sink: &mut impl EventSink,
    ) {
        if !net.is_connected() {
            sink.emit(&AppEvent::TelemetrySkipped);
            return;
        }
        let data = self.build_telemetry();
        match net.upload(&data) {
            Ok(()) => sink.emit(&AppEvent::TelemetryUploaded(data)),
            Err(e) => {
                warn!("telemetry: upload failed: {e}");
                sink.emit(&AppEvent::TelemetryFailed(e));
            }
        }
    }
}

impl Default for SiloService {
    fn default() -> Self {
        Self::new()
    }
}
