//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the silo's business rules: sensor fusion, fan
//! demand, alert resolution, and the notification and telemetry gates.
//! All interaction with hardware and the network happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
pub mod state;
