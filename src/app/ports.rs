//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SiloService (domain)
//! ```
//!
//! Driven adapters (sensors, relay, buzzer, network, event sinks) implement
//! these traits. The [`SiloService`](super::service::SiloService) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::control::alert::AlertLevel;
use crate::control::snapshot::RawReadings;
use crate::error::CommsError;

use super::events::{AppEvent, TelemetryData};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
pub trait SensorPort {
    /// Sample every sensor at uptime `now_ms`. Climate fields are `None`
    /// when the read failed; the service decides what to do with that.
    fn read_raw(&mut self, now_ms: u64) -> RawReadings;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the exhaust fan relay.
pub trait ActuatorPort {
    /// Drive the fan relay. Idempotent.
    fn set_fan(&mut self, on: bool);

    /// De-energise every actuator.
    fn all_off(&mut self);
}

/// Audible alarm. Implementations may block for the length of the
/// pattern; the loop period stretches accordingly.
pub trait AlarmPort {
    /// Play the pattern for `level`. `Safe` is silence.
    fn sound(&mut self, level: AlertLevel);

    /// Force the output low.
    fn silence(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Network ports (driven adapter: domain → cloud)
// ───────────────────────────────────────────────────────────────

/// Link state as observed at the moment of the call.
pub trait ConnectivityPort {
    fn is_connected(&self) -> bool;
}

/// Operator message channel (Telegram bot in production).
pub trait NotifierPort {
    /// Deliver `text` verbatim. One attempt, no retry.
    fn send(&mut self, text: &str) -> Result<(), CommsError>;
}

/// Telemetry uplink (ThingSpeak channel in production).
pub trait TelemetryPort {
    /// Publish one record. One attempt, no retry.
    fn upload(&mut self, data: &TelemetryData) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port. Adapters
/// decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
