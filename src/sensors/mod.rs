//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`RawReadings`] each
//! tick. Fusion with the previous snapshot happens in the domain core, not
//! here: the hub reports a failed climate read as `None` and moves on.

pub mod dht11;
pub mod gas;
pub mod motion;

use crate::control::snapshot::RawReadings;
use crate::error::SensorError;
use gas::GasSensor;
use motion::MotionSensor;

/// One temperature + humidity sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Anything that can produce a temperature/humidity pair.
pub trait ClimateSensor {
    /// Sample at uptime `now_ms`. Drivers that cannot be polled every
    /// tick may answer from their last transaction.
    fn read(&mut self, now_ms: u64) -> Result<ClimateReading, SensorError>;
}

impl<P, D> ClimateSensor for dht11::Dht11<P, D>
where
    P: embedded_hal::digital::InputPin + embedded_hal::digital::OutputPin,
    D: embedded_hal::delay::DelayNs,
{
    fn read(&mut self, now_ms: u64) -> Result<ClimateReading, SensorError> {
        dht11::Dht11::read(self, now_ms)
    }
}

/// Aggregates all sensor drivers and produces raw readings.
pub struct SensorHub<C> {
    pub climate: C,
    pub gas: GasSensor,
    pub motion: MotionSensor,
}

impl<C: ClimateSensor> SensorHub<C> {
    /// Construct a new hub. Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(climate: C, gas: GasSensor, motion: MotionSensor) -> Self {
        Self {
            climate,
            gas,
            motion,
        }
    }

    /// Read every sensor once. A failed climate read yields `None` for
    /// both climate fields; gas and motion are always present.
    pub fn read_all(&mut self, now_ms: u64) -> RawReadings {
        let climate = match self.climate.read(now_ms) {
            Ok(c) => Some(c),
            Err(e) => {
                log::debug!("climate sensor: {e}");
                None
            }
        };

        RawReadings {
            temperature_c: climate.map(|c| c.temperature_c),
            humidity_pct: climate.map(|c| c.humidity_pct),
            gas_level: self.gas.read(),
            motion_detected: self.motion.read(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::sync::Mutex;

    use super::{ClimateReading, ClimateSensor};
    use crate::error::SensorError;

    static SIM_CLIMATE: Mutex<Option<ClimateReading>> = Mutex::new(Some(ClimateReading {
        temperature_c: 25.0,
        humidity_pct: 40.0,
    }));

    /// Set the value the simulated climate sensor reports. `None` makes
    /// every read time out.
    pub fn sim_set_climate(reading: Option<ClimateReading>) {
        if let Ok(mut slot) = SIM_CLIMATE.lock() {
            *slot = reading;
        }
    }

    /// Climate sensor fed from [`sim_set_climate`].
    #[derive(Debug, Default)]
    pub struct SimClimate;

    impl ClimateSensor for SimClimate {
        fn read(&mut self, _now_ms: u64) -> Result<ClimateReading, SensorError> {
            SIM_CLIMATE
                .lock()
                .ok()
                .and_then(|slot| *slot)
                .ok_or(SensorError::Timeout)
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub use sim::{SimClimate, sim_set_climate};
