//! ThingSpeak channel uplink.
//!
//! Implements [`TelemetryPort`] as a plain-HTTP form POST to
//! `http://<host>/update`:
//!
//! | field    | value                      |
//! |----------|----------------------------|
//! | `field1` | temperature, °C            |
//! | `field2` | relative humidity, %       |
//! | `field3` | gas level, 10-bit raw      |
//! | `field4` | motion, `0` / `1`          |
//!
//! Only reaching the server counts as success; the status code is logged
//! and otherwise ignored.

use heapless::String as HString;
use log::{debug, warn};
use serde::Serialize;

use crate::app::events::TelemetryData;
use crate::app::ports::TelemetryPort;
use crate::config::SiloConfig;
use crate::error::CommsError;

/// Form body, fields serialized in declaration order.
#[derive(Debug, Serialize)]
struct UpdateForm<'a> {
    api_key: &'a str,
    field1: String,
    field2: String,
    field3: u16,
    field4: u8,
}

pub struct ThingSpeakUplink {
    api_key: HString<32>,
    host: HString<64>,
    #[cfg(not(target_os = "espidf"))]
    sim_posted: Vec<String>,
    #[cfg(not(target_os = "espidf"))]
    sim_reachable: bool,
}

impl ThingSpeakUplink {
    pub fn new(config: &SiloConfig) -> Self {
        Self {
            api_key: config.telemetry_api_key.clone(),
            host: config.telemetry_host.clone(),
            #[cfg(not(target_os = "espidf"))]
            sim_posted: Vec::new(),
            #[cfg(not(target_os = "espidf"))]
            sim_reachable: true,
        }
    }

    pub fn update_url(&self) -> String {
        format!("http://{}/update", self.host)
    }

    /// `application/x-www-form-urlencoded` body for one record.
    pub fn form_body(&self, data: &TelemetryData) -> Result<String, CommsError> {
        let form = UpdateForm {
            api_key: self.api_key.as_str(),
            field1: format!("{:.2}", data.temperature_c),
            field2: format!("{:.2}", data.humidity_pct),
            field3: data.gas_level,
            field4: u8::from(data.motion_detected),
        };
        serde_urlencoded::to_string(&form).map_err(|_| CommsError::Transport)
    }

    #[cfg(target_os = "espidf")]
    fn post(&mut self, body: &str) -> Result<u16, CommsError> {
        use embedded_svc::http::client::Client;
        use embedded_svc::io::Write;
        use esp_idf_svc::http::client::{Configuration as HttpConfig, EspHttpConnection};

        let url = self.update_url();
        let content_length = body.len().to_string();
        let headers = [
            ("X-THINGSPEAKAPIKEY", self.api_key.as_str()),
            ("Content-Type", "application/x-www-form-urlencoded"),
            ("Content-Length", content_length.as_str()),
            ("Connection", "close"),
        ];

        let connection =
            EspHttpConnection::new(&HttpConfig::default()).map_err(|_| CommsError::Transport)?;
        let mut client = Client::wrap(connection);
        let mut request = client
            .post(&url, &headers)
            .map_err(|_| CommsError::Transport)?;
        request
            .write_all(body.as_bytes())
            .map_err(|_| CommsError::Transport)?;
        request.flush().map_err(|_| CommsError::Transport)?;
        let response = request.submit().map_err(|_| CommsError::Transport)?;
        Ok(response.status())
    }

    #[cfg(not(target_os = "espidf"))]
    fn post(&mut self, body: &str) -> Result<u16, CommsError> {
        if !self.sim_reachable {
            return Err(CommsError::Transport);
        }
        self.sim_posted.push(body.to_owned());
        Ok(200)
    }

    /// Simulation: make the server unreachable.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_reachable(&mut self, reachable: bool) {
        self.sim_reachable = reachable;
    }

    /// Simulation: every body posted so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_posted(&self) -> &[String] {
        &self.sim_posted
    }
}

impl TelemetryPort for ThingSpeakUplink {
    fn upload(&mut self, data: &TelemetryData) -> Result<(), CommsError> {
        let body = self.form_body(data)?;
        let status = self.post(&body)?;
        if status == 200 {
            debug!("ThingSpeak: update accepted");
        } else {
            warn!("ThingSpeak: update answered {status}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uplink() -> ThingSpeakUplink {
        let cfg = SiloConfig::new("SiloNet", "password1", "1:a", "2", "WRITEKEY123").unwrap();
        ThingSpeakUplink::new(&cfg)
    }

    fn sample() -> TelemetryData {
        TelemetryData {
            temperature_c: 24.456,
            humidity_pct: 51.0,
            gas_level: 97,
            motion_detected: true,
            ..TelemetryData::default()
        }
    }

    #[test]
    fn body_field_order_and_format() {
        let body = uplink().form_body(&sample()).unwrap();
        assert_eq!(
            body,
            "api_key=WRITEKEY123&field1=24.46&field2=51.00&field3=97&field4=1"
        );
    }

    #[test]
    fn motion_absent_is_zero() {
        let data = TelemetryData {
            motion_detected: false,
            ..sample()
        };
        assert!(uplink().form_body(&data).unwrap().ends_with("&field4=0"));
    }

    #[test]
    fn default_host() {
        assert_eq!(uplink().update_url(), "http://api.thingspeak.com/update");
    }

    #[test]
    fn unreachable_server_is_transport_error() {
        let mut u = uplink();
        u.sim_set_reachable(false);
        assert_eq!(u.upload(&sample()), Err(CommsError::Transport));
        assert!(u.sim_posted().is_empty());
    }

    #[test]
    fn upload_posts_one_body() {
        let mut u = uplink();
        u.upload(&sample()).unwrap();
        assert_eq!(u.sim_posted().len(), 1);
    }
}
