//! Exhaust fan relay driver.
//!
//! The relay module on the board energises its coil when the input is
//! pulled LOW. That inversion is captured by [`Polarity`] and never leaves
//! this file: callers only ever ask for the fan to be on or off.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the relay GPIO via hw_init.
//! On host/test: writes the simulated pin level register.

use log::debug;

use crate::drivers::hw_init;
use crate::pins;

/// Electrical level that energises a digital actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Pin level (`true` = HIGH) that realises the logical state `on`.
    pub const fn level_for(self, on: bool) -> bool {
        match self {
            Self::ActiveHigh => on,
            Self::ActiveLow => !on,
        }
    }
}

pub struct FanRelay {
    gpio: i32,
    polarity: Polarity,
    running: bool,
}

impl FanRelay {
    /// Relay on the board's fan GPIO, active-LOW.
    pub fn new() -> Self {
        Self::with_pin(pins::FAN_RELAY_GPIO, Polarity::ActiveLow)
    }

    pub fn with_pin(gpio: i32, polarity: Polarity) -> Self {
        Self {
            gpio,
            polarity,
            running: false,
        }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, self.polarity.level_for(on));
        if on != self.running {
            debug!("relay: fan {}", if on { "ON" } else { "OFF" });
        }
        self.running = on;
    }

    pub fn stop(&mut self) {
        self.set(false);
    }
}

impl Default for FanRelay {
    fn default() -> Self {
        Self::new()
    }
}
