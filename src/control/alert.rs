//! Alert resolution.
//!
//! Rules are evaluated top to bottom and the first match wins:
//!
//! 1. gas above the spoilage level, or humidity above the spoilage level → `Spoilage`
//! 2. humidity above the spoilage level → `HighHumidity`
//! 3. motion → `Intruder`
//! 4. otherwise → `Safe`
//!
//! Rule 2 can never fire because rule 1 already covers its condition. It is
//! kept as written so the alarm behaves exactly like the deployed units; the
//! `HighHumidity` level, its buzzer pattern and its message exist for a
//! future split of rule 1.

use core::fmt;

use serde::Serialize;

use crate::config::{SPOILAGE_GAS_LEVEL, SPOILAGE_HUMIDITY_PCT};
use crate::control::snapshot::SensorSnapshot;

/// Exactly one level is active per tick. Ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum AlertLevel {
    #[default]
    Safe,
    Intruder,
    HighHumidity,
    Spoilage,
}

impl AlertLevel {
    pub const ALL: [Self; 4] = [Self::Safe, Self::Intruder, Self::HighHumidity, Self::Spoilage];

    /// Status text shown on the dashboard banner.
    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Intruder => "INTRUDER DETECTED!",
            Self::HighHumidity => "HIGH HUMIDITY ALERT!",
            Self::Spoilage => "SPOILAGE ALERT!",
        }
    }

    /// Operator message for this level. `None` for `Safe`.
    pub fn notification_text(self) -> Option<&'static str> {
        match self {
            Self::Safe => None,
            Self::Intruder => Some("⚠️ SECURITY ALERT: Motion detected at Grain Silo hatch!"),
            Self::HighHumidity => {
                Some("💧 CLIMATE ALERT: Moisture > 50%. Exhaust Fan activated to purge air.")
            }
            Self::Spoilage => Some("🚨 CRITICAL ALERT: High Gas/Smoke detected in Grain Silo!"),
        }
    }

    pub fn is_alarm(self) -> bool {
        self != Self::Safe
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a snapshot to its alert level.
pub fn resolve(snap: &SensorSnapshot) -> AlertLevel {
    if snap.gas_level > SPOILAGE_GAS_LEVEL || snap.humidity_pct > SPOILAGE_HUMIDITY_PCT {
        AlertLevel::Spoilage
    } else if snap.humidity_pct > SPOILAGE_HUMIDITY_PCT {
        AlertLevel::HighHumidity
    } else if snap.motion_detected {
        AlertLevel::Intruder
    } else {
        AlertLevel::Safe
    }
}
