//! Everything the control loop remembers between ticks, in one place.

use crate::control::alert::AlertLevel;
use crate::control::snapshot::SensorSnapshot;
use crate::scheduler::{NotificationGate, TelemetryScheduler};

/// Owned by [`SiloService`](super::service::SiloService); nothing else
/// writes it.
#[derive(Debug, Clone, Default)]
pub struct ControlLoopState {
    /// Fused readings from the most recent tick.
    pub snapshot: SensorSnapshot,
    /// Last commanded fan state.
    pub fan_running: bool,
    /// Alert resolved on the most recent tick.
    pub alert: AlertLevel,
    pub gate: NotificationGate,
    pub telemetry: TelemetryScheduler,
    pub tick_count: u64,
}
