//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the fan relay, exposing them through
//! [`SensorPort`] and [`ActuatorPort`]. On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::snapshot::RawReadings;
use crate::drivers::relay::FanRelay;
use crate::sensors::{ClimateSensor, SensorHub};

/// Concrete adapter that combines all sensing and switching hardware.
pub struct HardwareAdapter<C> {
    sensor_hub: SensorHub<C>,
    fan: FanRelay,
}

impl<C: ClimateSensor> HardwareAdapter<C> {
    pub fn new(sensor_hub: SensorHub<C>, fan: FanRelay) -> Self {
        Self { sensor_hub, fan }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<C: ClimateSensor> SensorPort for HardwareAdapter<C> {
    fn read_raw(&mut self, now_ms: u64) -> RawReadings {
        self.sensor_hub.read_all(now_ms)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<C> ActuatorPort for HardwareAdapter<C> {
    fn set_fan(&mut self, on: bool) {
        self.fan.set(on);
    }

    fn all_off(&mut self) {
        self.fan.stop();
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;
    use crate::drivers::hw_init::sim_gpio_level;
    use crate::drivers::relay::Polarity;
    use crate::sensors::gas::{GasSensor, sim_set_gas_level};
    use crate::sensors::motion::{MotionSensor, sim_set_motion};
    use crate::sensors::{ClimateReading, SimClimate, sim_set_climate};

    #[test]
    fn fan_goes_through_relay_polarity() {
        let hub = SensorHub::new(SimClimate, GasSensor::new(), MotionSensor::new());
        let mut hw = HardwareAdapter::new(hub, FanRelay::with_pin(43, Polarity::ActiveLow));

        hw.set_fan(true);
        assert!(!sim_gpio_level(43));

        hw.all_off();
        assert!(sim_gpio_level(43));
    }

    #[test]
    fn reads_simulated_sensors() {
        sim_set_climate(Some(ClimateReading {
            temperature_c: 25.0,
            humidity_pct: 40.0,
        }));
        sim_set_gas_level(300);
        sim_set_motion(true);
        let hub = SensorHub::new(SimClimate, GasSensor::new(), MotionSensor::new());
        let mut hw = HardwareAdapter::new(hub, FanRelay::with_pin(44, Polarity::ActiveLow));
        let raw = hw.read_raw(0);
        assert_eq!(raw.temperature_c, Some(25.0));
        assert_eq!(raw.humidity_pct, Some(40.0));
        assert_eq!(raw.gas_level, 300);
        assert!(raw.motion_detected);
    }
}
