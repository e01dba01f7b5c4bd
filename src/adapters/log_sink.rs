//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | fan=OFF alert=SAFE");
            }
            AppEvent::FanChanged { on } => {
                info!("FAN | {}", if *on { "ON (purging)" } else { "OFF" });
            }
            AppEvent::AlertChanged { from, to } => {
                if to.is_alarm() {
                    warn!("ALERT | {} -> {}", from, to);
                } else {
                    info!("ALERT | {} -> {}", from, to);
                }
            }
            AppEvent::NotificationSent(level) => {
                info!("NOTIFY | sent: {}", level);
            }
            AppEvent::NotificationSkipped(level) => {
                info!("NOTIFY | skipped (offline): {}", level);
            }
            AppEvent::NotificationFailed(level, e) => {
                warn!("NOTIFY | failed: {} ({})", level, e);
            }
            AppEvent::TelemetryUploaded(t) => {
                info!(
                    "TELEM | T={:.1}\u{00b0}C H={:.1}% gas={} motion={} fan={} alert={}",
                    t.temperature_c,
                    t.humidity_pct,
                    t.gas_level,
                    u8::from(t.motion_detected),
                    if t.fan_running { "ON" } else { "OFF" },
                    t.alert,
                );
            }
            AppEvent::TelemetrySkipped => {
                info!("TELEM | skipped (offline)");
            }
            AppEvent::TelemetryFailed(e) => {
                warn!("TELEM | failed ({})", e);
            }
        }
    }
}
