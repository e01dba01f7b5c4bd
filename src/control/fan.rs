//! Exhaust fan decision.
//!
//! Bang-bang on the current snapshot only: no hysteresis, no debounce.
//! A reading that hovers at a threshold makes the fan follow it tick by
//! tick.

use crate::config::{FAN_GAS_LEVEL, FAN_HUMIDITY_PCT};
use crate::control::snapshot::SensorSnapshot;

/// Whether the exhaust fan should run for this snapshot.
pub fn fan_demand(snap: &SensorSnapshot) -> bool {
    snap.humidity_pct > FAN_HUMIDITY_PCT || snap.gas_level > FAN_GAS_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(humidity_pct: f32, gas_level: u16) -> SensorSnapshot {
        SensorSnapshot {
            temperature_c: 25.0,
            humidity_pct,
            gas_level,
            motion_detected: false,
        }
    }

    #[test]
    fn thresholds_are_strict() {
        assert!(!fan_demand(&snap(50.0, 90)));
        assert!(fan_demand(&snap(50.1, 90)));
        assert!(fan_demand(&snap(50.0, 91)));
    }

    #[test]
    fn either_condition_runs_fan() {
        assert!(fan_demand(&snap(55.0, 10)));
        assert!(fan_demand(&snap(20.0, 95)));
        assert!(!fan_demand(&snap(30.0, 10)));
    }
}
