//! GPIO / peripheral pin assignments for the SiloWatch main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT11 temperature/humidity sensor — single-wire, open-drain with pull-up.
pub const DHT_GPIO: i32 = 4;

/// HC-SR501 PIR motion sensor — digital output, HIGH = motion.
pub const PIR_GPIO: i32 = 5;

/// MQ-135 gas sensor — analog output via resistive divider.
/// ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const GAS_ADC_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Exhaust fan relay module input. The module is active-LOW.
pub const FAN_RELAY_GPIO: i32 = 6;

/// Active piezo buzzer (driven through an NPN transistor, active HIGH).
pub const BUZZER_GPIO: i32 = 7;
