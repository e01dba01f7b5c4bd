//! MQ-series gas/smoke sensor, analog output on ADC1.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the 12-bit oneshot ADC (initialised by hw_init) and
//! scales it to the 10-bit range the thresholds are written in.
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_GAS_LEVEL: AtomicU16 = AtomicU16::new(0);

/// Inject a gas level (10-bit scale) for host simulation.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gas_level(level: u16) {
    SIM_GAS_LEVEL.store(level.min(GAS_LEVEL_MAX), Ordering::Relaxed);
}

/// Top of the 10-bit scale.
pub const GAS_LEVEL_MAX: u16 = 1023;

/// Convert a 12-bit ADC sample to the 10-bit scale.
pub const fn scale_12_to_10(raw: u16) -> u16 {
    let level = raw >> 2;
    if level > GAS_LEVEL_MAX { GAS_LEVEL_MAX } else { level }
}

#[derive(Debug, Default)]
pub struct GasSensor;

impl GasSensor {
    pub fn new() -> Self {
        Self
    }

    /// Current level, 0 – 1023.
    #[cfg(target_os = "espidf")]
    pub fn read(&self) -> u16 {
        scale_12_to_10(hw_init::adc1_read(hw_init::ADC1_CH_GAS))
    }

    /// Current level, 0 – 1023.
    #[cfg(not(target_os = "espidf"))]
    pub fn read(&self) -> u16 {
        SIM_GAS_LEVEL.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_keeps_threshold_meaning() {
        assert_eq!(scale_12_to_10(0), 0);
        assert_eq!(scale_12_to_10(363), 90);
        assert_eq!(scale_12_to_10(364), 91);
        assert_eq!(scale_12_to_10(4095), 1023);
    }

    #[test]
    fn out_of_range_sample_saturates() {
        assert_eq!(scale_12_to_10(u16::MAX), GAS_LEVEL_MAX);
    }
}
