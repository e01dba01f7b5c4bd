//! Integration tests for the SiloService → actuators / alarm / network
//! pipeline, driven tick by tick with mock adapters.

use silowatch::app::events::AppEvent;
use silowatch::app::service::SiloService;
use silowatch::control::alert::AlertLevel;
use silowatch::error::CommsError;

use super::mock_hw::{MockAlarm, MockHardware, MockNetwork, RecordingSink};

struct Rig {
    app: SiloService,
    hw: MockHardware,
    alarm: MockAlarm,
    net: MockNetwork,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        let mut rig = Self {
            app: SiloService::new(),
            hw: MockHardware::new(),
            alarm: MockAlarm::default(),
            net: MockNetwork::online(),
            sink: RecordingSink::default(),
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    fn tick(&mut self, now_ms: u64) {
        self.app
            .tick(now_ms, &mut self.hw, &mut self.alarm, &mut self.net, &mut self.sink);
    }
}

/// Past the boot-time notification cooldown.
const AFTER_BOOT: u64 = 70_000;

// ── Boot ─────────────────────────────────────────────────────

#[test]
fn start_forces_fan_off_and_announces() {
    let rig = Rig::new();
    assert_eq!(rig.hw.all_off_calls, 1);
    assert_eq!(rig.sink.events, vec![AppEvent::Started]);
    assert!(!rig.app.state().fan_running);
}

#[test]
fn no_notification_during_first_minute() {
    let mut rig = Rig::new();
    rig.hw.set(30.0, 10, true);
    for t in (100..=60_000).step_by(100) {
        rig.tick(t);
    }
    assert!(rig.net.sent.is_empty());
    rig.tick(60_100);
    assert_eq!(rig.net.sent.len(), 1);
}

// ── Decision scenarios ───────────────────────────────────────

#[test]
fn gas_spike_runs_fan_and_raises_spoilage() {
    let mut rig = Rig::new();
    rig.hw.set(40.0, 95, false);
    rig.tick(AFTER_BOOT);

    assert_eq!(rig.hw.last_fan(), Some(true));
    assert_eq!(rig.app.alert(), AlertLevel::Spoilage);
    assert_eq!(rig.alarm.sounded, vec![AlertLevel::Spoilage]);
    assert_eq!(
        rig.net.sent,
        vec![AlertLevel::Spoilage.notification_text().unwrap().to_owned()]
    );
}

#[test]
fn humid_but_below_spoilage_is_safe_with_fan() {
    let mut rig = Rig::new();
    rig.hw.set(55.0, 50, false);
    rig.tick(AFTER_BOOT);

    assert_eq!(rig.hw.last_fan(), Some(true));
    assert_eq!(rig.app.alert(), AlertLevel::Safe);
    assert_eq!(rig.alarm.sounded, vec![AlertLevel::Safe]);
    assert!(rig.net.sent.is_empty());
}

#[test]
fn motion_alone_is_intruder_without_fan() {
    let mut rig = Rig::new();
    rig.hw.set(30.0, 10, true);
    rig.tick(AFTER_BOOT);

    assert_eq!(rig.hw.last_fan(), Some(false));
    assert_eq!(rig.app.alert(), AlertLevel::Intruder);
    assert_eq!(rig.alarm.sounded, vec![AlertLevel::Intruder]);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::NotificationSent(AlertLevel::Intruder))), 1);
}

#[test]
fn very_humid_air_is_spoilage_never_high_humidity() {
    let mut rig = Rig::new();
    rig.hw.set(75.0, 10, false);
    rig.tick(AFTER_BOOT);
    assert_eq!(rig.app.alert(), AlertLevel::Spoilage);
}

// ── Notification gate ────────────────────────────────────────

#[test]
fn cooldown_is_shared_across_alert_kinds() {
    let mut rig = Rig::new();
    rig.hw.set(40.0, 95, false);
    rig.tick(AFTER_BOOT);
    rig.hw.set(30.0, 10, true);
    rig.tick(AFTER_BOOT + 10_000);

    assert_eq!(rig.net.sent.len(), 1);
    assert_eq!(rig.app.alert(), AlertLevel::Intruder);

    rig.tick(AFTER_BOOT + 60_000);
    assert_eq!(rig.net.sent.len(), 1);
    rig.tick(AFTER_BOOT + 60_001);
    assert_eq!(rig.net.sent.len(), 2);
    assert_eq!(
        rig.net.sent[1],
        AlertLevel::Intruder.notification_text().unwrap()
    );
}

#[test]
fn offline_dispatch_consumes_cooldown() {
    let mut rig = Rig::new();
    rig.net.connected = false;
    rig.hw.set(30.0, 10, true);
    rig.tick(AFTER_BOOT);

    assert!(rig.net.sent.is_empty());
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::NotificationSkipped(AlertLevel::Intruder))),
        1
    );

    rig.net.connected = true;
    rig.tick(AFTER_BOOT + 30_000);
    assert!(rig.net.sent.is_empty());

    rig.tick(AFTER_BOOT + 60_001);
    assert_eq!(rig.net.sent.len(), 1);
}

#[test]
fn failed_dispatch_is_not_retried_before_cooldown() {
    let mut rig = Rig::new();
    rig.net.notify_result = Err(CommsError::HttpStatus(429));
    rig.hw.set(30.0, 10, true);
    rig.tick(AFTER_BOOT);
    rig.tick(AFTER_BOOT + 100);
    rig.tick(AFTER_BOOT + 5_000);

    assert_eq!(rig.net.sent.len(), 1);
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::NotificationFailed(AlertLevel::Intruder, CommsError::HttpStatus(429))
        )),
        1
    );
}

#[test]
fn safe_ticks_never_notify() {
    let mut rig = Rig::new();
    for t in (AFTER_BOOT..AFTER_BOOT + 200_000).step_by(1_000) {
        rig.tick(t);
    }
    assert!(rig.net.sent.is_empty());
}

// ── Acquisition fallback ─────────────────────────────────────

#[test]
fn failed_climate_read_holds_previous_value() {
    let mut rig = Rig::new();
    rig.hw.set_climate(Some(22.0), Some(45.0));
    rig.tick(100);

    rig.hw.set_climate(None, None);
    rig.tick(200);
    let snap = rig.app.state().snapshot;
    assert_eq!(snap.temperature_c, 22.0);
    assert_eq!(snap.humidity_pct, 45.0);

    rig.hw.set_climate(Some(23.0), Some(47.0));
    rig.tick(300);
    let snap = rig.app.state().snapshot;
    assert_eq!(snap.temperature_c, 23.0);
    assert_eq!(snap.humidity_pct, 47.0);
}

#[test]
fn nan_never_reaches_the_snapshot() {
    let mut rig = Rig::new();
    rig.hw.set_climate(Some(22.0), Some(45.0));
    rig.tick(100);
    rig.hw.set_climate(Some(f32::NAN), Some(f32::NAN));
    rig.tick(200);

    let snap = rig.app.state().snapshot;
    assert!(!snap.temperature_c.is_nan());
    assert!(!snap.humidity_pct.is_nan());
    assert_eq!(rig.app.alert(), AlertLevel::Safe);
}

// ── Change events ────────────────────────────────────────────

#[test]
fn fan_and_alert_events_only_on_change() {
    let mut rig = Rig::new();
    rig.hw.set(55.0, 10, false);
    rig.tick(100);
    rig.tick(200);
    rig.hw.set(40.0, 10, true);
    rig.tick(300);
    rig.tick(400);

    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::FanChanged { .. })),
        2
    );
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::AlertChanged { .. })),
        1
    );
    assert!(rig.sink.events.contains(&AppEvent::AlertChanged {
        from: AlertLevel::Safe,
        to: AlertLevel::Intruder,
    }));
    // The relay is still driven every tick.
    assert_eq!(rig.hw.fan_calls, vec![true, true, false, false]);
    assert_eq!(rig.app.tick_count(), 4);
}

// ── Telemetry ────────────────────────────────────────────────

#[test]
fn telemetry_every_twenty_seconds() {
    let mut rig = Rig::new();
    for t in (100..=40_000).step_by(100) {
        rig.tick(t);
    }
    assert_eq!(rig.net.uploads.len(), 2);
}

#[test]
fn offline_slot_is_dropped_and_schedule_advances() {
    let mut rig = Rig::new();
    rig.tick(20_000);
    assert_eq!(rig.net.uploads.len(), 1);

    rig.net.connected = false;
    rig.tick(40_000);
    assert_eq!(rig.net.uploads.len(), 1);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::TelemetrySkipped), 1);

    rig.net.connected = true;
    rig.tick(40_100);
    rig.tick(59_900);
    assert_eq!(rig.net.uploads.len(), 1);
    rig.tick(60_000);
    assert_eq!(rig.net.uploads.len(), 2);
}

#[test]
fn upload_failure_is_reported_not_retried() {
    let mut rig = Rig::new();
    rig.net.upload_result = Err(CommsError::Transport);
    rig.tick(20_000);
    rig.tick(20_100);
    assert_eq!(rig.net.uploads.len(), 1);
    assert_eq!(
        rig.sink.count(|e| *e == AppEvent::TelemetryFailed(CommsError::Transport)),
        1
    );
}

#[test]
fn upload_carries_latest_state() {
    let mut rig = Rig::new();
    rig.hw.set_climate(Some(19.5), Some(58.0));
    rig.hw.next.gas_level = 42;
    rig.tick(20_000);

    let sent = rig.net.uploads[0];
    assert_eq!(sent.temperature_c, 19.5);
    assert_eq!(sent.humidity_pct, 58.0);
    assert_eq!(sent.gas_level, 42);
    assert!(sent.fan_running);
    assert_eq!(sent.alert, AlertLevel::Safe);
}
