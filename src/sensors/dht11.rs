//! DHT11 temperature/humidity sensor on a single open-drain line.
//!
//! ```text
//!  host:   ‾‾‾\______18 ms______/‾‾ release
//!  sensor:                          \__80us__/‾‾80us‾‾\  then 40 bits:
//!  bit:    \__50us__/‾‾ 26-28us ‾‾\   = 0
//!          \__50us__/‾‾‾‾ 70us ‾‾‾‾\  = 1
//! ```
//!
//! Frame: humidity int, humidity dec, temperature int, temperature dec,
//! checksum (low byte of the sum of the first four). Bit 7 of the
//! temperature decimal byte marks a negative reading.
//!
//! Bits are decoded by comparing each high pulse against the 50 µs low
//! pulse in front of it, both measured in poll iterations. The result does
//! not depend on how long one iteration takes on the target.
//!
//! The sensor needs about a second between conversions. A read issued
//! within [`DHT_MIN_INTERVAL_MS`] of the previous transaction returns that
//! transaction's result without touching the line.
//!
//! Generic over `embedded-hal` pins and delays so the bit-banging runs
//! against mocks on the host.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::ClimateReading;
use crate::config::DHT_MIN_INTERVAL_MS;
use crate::error::SensorError;

const START_LOW_MS: u32 = 18;
const RELEASE_US: u32 = 30;
/// Bound on the polls spent waiting for any single edge. Each poll
/// sleeps at least 1 µs, so this is never shorter than 100 µs.
const EDGE_TIMEOUT_POLLS: u32 = 100;

pub struct Dht11<P, D> {
    pin: P,
    delay: D,
    last: Option<(u64, Result<ClimateReading, SensorError>)>,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            last: None,
        }
    }

    /// Sample at uptime `now_ms`. One transaction per window, no retries;
    /// the caller keeps the last good value.
    pub fn read(&mut self, now_ms: u64) -> Result<ClimateReading, SensorError> {
        if let Some((at, result)) = self.last {
            if now_ms.saturating_sub(at) < DHT_MIN_INTERVAL_MS {
                return result;
            }
        }
        let result = self.read_frame().and_then(|frame| decode_frame(&frame));
        self.last = Some((now_ms, result));
        result
    }

    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        // Start signal
        self.pin.set_low().map_err(|_| SensorError::GpioFault)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| SensorError::GpioFault)?;
        self.delay.delay_us(RELEASE_US);

        // Response: sensor pulls low, then high, then low again
        self.wait_for(false)?;
        self.wait_for(true)?;
        self.wait_for(false)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            let low = self.wait_for(true)?;
            let high = self.wait_for(false)?;
            if high > low {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Busy-wait until the line reads `high`. Returns the polls spent.
    fn wait_for(&mut self, high: bool) -> Result<u32, SensorError> {
        let mut polls = 0;
        while self.pin.is_high().map_err(|_| SensorError::GpioFault)? != high {
            if polls >= EDGE_TIMEOUT_POLLS {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            polls += 1;
        }
        Ok(polls)
    }
}

/// Validate and decode a raw 5-byte frame.
pub fn decode_frame(frame: &[u8; 5]) -> Result<ClimateReading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) / 10.0;
    let magnitude = f32::from(frame[2]) + f32::from(frame[3] & 0x7F) / 10.0;
    let temperature_c = if frame[3] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    Ok(ClimateReading {
        temperature_c,
        humidity_pct,
    })
}
