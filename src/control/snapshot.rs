//! Fused sensor snapshot and the stale-value fallback that builds it.
//!
//! The sensor hub hands over [`RawReadings`] in which the climate fields
//! may be missing. [`SensorSnapshot::apply`] folds them into the previous
//! snapshot so that no invalid number ever reaches the decision logic.

use serde::Serialize;

/// Readings as delivered by the sensor port, before fusion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawReadings {
    /// `None` when the climate sensor read failed.
    pub temperature_c: Option<f32>,
    /// `None` when the climate sensor read failed.
    pub humidity_pct: Option<f32>,
    /// Raw gas ADC value on the 10-bit scale (0 – 1023).
    pub gas_level: u16,
    pub motion_detected: bool,
}

/// A point-in-time snapshot of every sensor in the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SensorSnapshot {
    /// Air temperature (°C). Last valid reading.
    pub temperature_c: f32,
    /// Relative humidity (%). Last valid reading.
    pub humidity_pct: f32,
    /// Raw gas ADC value on the 10-bit scale.
    pub gas_level: u16,
    /// True while the PIR output is HIGH.
    pub motion_detected: bool,
}

/// Which climate fields kept their previous value on the last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldFields {
    pub temperature: bool,
    pub humidity: bool,
}

impl HeldFields {
    pub fn any(self) -> bool {
        self.temperature || self.humidity
    }
}

fn valid(reading: Option<f32>) -> Option<f32> {
    reading.filter(|v| v.is_finite())
}

impl SensorSnapshot {
    /// Fold a new set of readings into the snapshot. Gas and motion are
    /// always taken; temperature and humidity only when valid.
    pub fn apply(&mut self, raw: RawReadings) -> HeldFields {
        let mut held = HeldFields::default();

        match valid(raw.temperature_c) {
            Some(t) => self.temperature_c = t,
            None => held.temperature = true,
        }
        match valid(raw.humidity_pct) {
            Some(h) => self.humidity_pct = h,
            None => held.humidity = true,
        }
        self.gas_level = raw.gas_level;
        self.motion_detected = raw.motion_detected;

        held
    }
}
