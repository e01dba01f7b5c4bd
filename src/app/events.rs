//! Outbound application events.
//!
//! The [`SiloService`](super::service::SiloService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — serial log today.

use serde::Serialize;

use crate::control::alert::AlertLevel;
use crate::error::CommsError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started; fan is off and no alert is active.
    Started,

    /// The fan relay was switched.
    FanChanged { on: bool },

    /// The resolved alert level changed since the previous tick.
    AlertChanged { from: AlertLevel, to: AlertLevel },

    /// An operator notification was delivered.
    NotificationSent(AlertLevel),

    /// The cooldown opened but the link was down; the slot is spent.
    NotificationSkipped(AlertLevel),

    /// The notifier rejected or failed the request.
    NotificationFailed(AlertLevel, CommsError),

    /// A telemetry record was accepted by the uplink.
    TelemetryUploaded(TelemetryData),

    /// The telemetry slot came due while the link was down.
    TelemetrySkipped,

    /// The uplink rejected or failed the request.
    TelemetryFailed(CommsError),
}

/// A point-in-time view of the silo, used for the uplink and the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TelemetryData {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub gas_level: u16,
    pub motion_detected: bool,
    pub fan_running: bool,
    pub alert: AlertLevel,
}
