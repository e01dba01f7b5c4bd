//! HC-SR501 PIR motion sensor on the silo hatch.
//!
//! The module drives its output HIGH for as long as it sees motion
//! (retrigger mode); the firmware just samples the level.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the real GPIO level via hw_init helpers.
//! On host/test: reads from a static AtomicBool (no motion by default).

use core::sync::atomic::AtomicBool;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::pins;

static SIM_MOTION: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_motion(detected: bool) {
    SIM_MOTION.store(detected, Ordering::Relaxed);
}

pub struct MotionSensor {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    gpio: i32,
}

impl MotionSensor {
    pub fn new() -> Self {
        Self::with_pin(pins::PIR_GPIO)
    }

    pub fn with_pin(gpio: i32) -> Self {
        Self { gpio }
    }

    #[cfg(target_os = "espidf")]
    pub fn read(&self) -> bool {
        hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&self) -> bool {
        SIM_MOTION.load(Ordering::Relaxed)
    }
}

impl Default for MotionSensor {
    fn default() -> Self {
        Self::new()
    }
}
