//! Local status page served on the LAN.
//!
//! `GET /` returns a self-refreshing HTML page built from the latest
//! [`TelemetryData`]; `GET /status.json` returns the same view as JSON.
//! The control loop publishes a fresh copy every tick; the ESP-IDF HTTP
//! server task reads it under the same lock. On host
//! targets there is no server, only the shared view and the renderer.

use core::fmt::Write as _;
use std::sync::{Arc, Mutex};

use log::warn;

use crate::app::events::TelemetryData;
use crate::config::DASHBOARD_REFRESH_SECS;
use crate::control::alert::AlertLevel;

const STYLE: &str = "\
body{font-family:'Segoe UI',Tahoma,sans-serif;background:#e8f5e9;color:#1b5e20;margin:0;padding:20px;text-align:center}\
h1{margin-bottom:5px;color:#2e7d32}\
.grid{display:flex;flex-wrap:wrap;justify-content:center;gap:20px;max-width:900px;margin:0 auto}\
.card{background:#fff;border-radius:15px;padding:25px;width:200px;box-shadow:0 6px 12px rgba(0,0,0,.1);border-top:6px solid #4caf50}\
.card h3{margin:0;color:#757575;text-transform:uppercase;letter-spacing:1px}\
.value{font-size:2.2em;font-weight:bold;margin-top:15px}\
.status-banner{margin:10px auto 30px;padding:20px;border-radius:10px;max-width:860px;font-size:1.8em;font-weight:bold;color:#fff}\
.safe{background:#4caf50}\
.danger{background:#d32f2f;animation:blink 1s linear infinite}\
@keyframes blink{50%{opacity:.8}}";

/// Render the dashboard for one point-in-time view.
pub fn render_html(data: &TelemetryData) -> String {
    let mut html = String::with_capacity(3072);

    // `write!` into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><title>Smart Silo Dashboard</title>\
         <meta charset='UTF-8'>\
         <meta name='viewport' content='width=device-width, initial-scale=1'>\
         <meta http-equiv='refresh' content='{DASHBOARD_REFRESH_SECS}'>\
         <style>{STYLE}</style></head><body>\
         <h1>&#127806; Smart Grain Silo</h1>"
    );

    let (class, icon) = if data.alert == AlertLevel::Safe {
        ("safe", "&#9989;")
    } else {
        ("danger", "&#128680;")
    };
    let _ = write!(
        html,
        "<div class='status-banner {class}'>{icon} SYSTEM STATUS: {}</div>",
        data.alert.label()
    );

    let _ = write!(
        html,
        "<div class='grid'>\
         <div class='card'><h3>Temperature</h3><div class='value'>{:.1} &deg;C</div></div>\
         <div class='card'><h3>Humidity</h3><div class='value'>{:.1} %</div></div>\
         <div class='card'><h3>Gas/Smoke</h3><div class='value'>{}</div></div>\
         <div class='card'><h3>Exhaust Fan</h3><div class='value'>{}</div></div>\
         <div class='card'><h3>Motion</h3><div class='value'>{}</div></div>\
         </div></body></html>",
        data.temperature_c,
        data.humidity_pct,
        data.gas_level,
        if data.fan_running { "PURGING AIR" } else { "OFF" },
        if data.motion_detected {
            "MOVEMENT DETECTED!"
        } else {
            "No Motion"
        },
    );

    html
}

/// Handle to the view shared with the HTTP server.
#[derive(Clone, Default)]
pub struct DashboardView(Arc<Mutex<TelemetryData>>);

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published view. A poisoned lock is taken over and
    /// cleared, so one panicked reader cannot freeze the page.
    pub fn publish(&self, data: TelemetryData) {
        match self.0.lock() {
            Ok(mut slot) => *slot = data,
            Err(poisoned) => {
                warn!("dashboard: view lock poisoned, recovering");
                *poisoned.into_inner() = data;
                self.0.clear_poison();
            }
        }
    }

    /// Copy of the published view. A poisoned lock still yields the
    /// last value written.
    pub fn latest(&self) -> TelemetryData {
        match self.0.lock() {
            Ok(slot) => *slot,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn render(&self) -> String {
        render_html(&self.latest())
    }

    /// Machine-readable form of the same view.
    pub fn render_json(&self) -> String {
        serde_json::to_string(&self.latest()).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Running HTTP server. Dropping it stops the server.
#[cfg(target_os = "espidf")]
pub struct DashboardServer {
    _server: esp_idf_svc::http::server::EspHttpServer<'static>,
}

#[cfg(target_os = "espidf")]
impl DashboardServer {
    pub fn start(port: u16, view: DashboardView) -> anyhow::Result<Self> {
        use embedded_svc::io::Write;
        use esp_idf_svc::http::Method;
        use esp_idf_svc::http::server::{Configuration, EspHttpServer};

        let mut server = EspHttpServer::new(&Configuration {
            http_port: port,
            ..Default::default()
        })?;
        let html_view = view.clone();
        server.fn_handler("/", Method::Get, move |req| -> anyhow::Result<()> {
            let html = html_view.render();
            let mut resp = req.into_response(200, None, &[("Content-Type", "text/html")])?;
            resp.write_all(html.as_bytes())?;
            Ok(())
        })?;
        server.fn_handler("/status.json", Method::Get, move |req| -> anyhow::Result<()> {
            let json = view.render_json();
            let mut resp =
                req.into_response(200, None, &[("Content-Type", "application/json")])?;
            resp.write_all(json.as_bytes())?;
            Ok(())
        })?;
        log::info!("dashboard: listening on port {port}");
        Ok(Self { _server: server })
    }
}
