//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`] — the hexagonal boundary for network
//! connectivity.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests; the link
//!   is controlled per instance with [`WifiAdapter::sim_set_link`].
//!
//! ## Connection policy
//!
//! Boot blocks in [`WifiAdapter::connect_blocking`] until the AP accepts
//! us, retrying every 500 ms with no upper bound. After boot,
//! [`WifiAdapter::poll`] notices a dropped link and retries with an
//! exponential backoff (2 s → 4 s → 8 s … capped at 60 s).
//!
//! `poll` runs inside the control loop and never blocks: a retry only
//! issues the association request, and later polls watch for the netif to
//! come up. An attempt that has not finished after
//! [`WIFI_ASSOCIATE_TIMEOUT_MS`] counts as failed.
//!
//! ```text
//!  Connected ──link lost──▶ Reconnecting ──due──▶ Associating ──up──▶ Connected
//!                               ▲                      │
//!                               └──── timeout / error ─┘  (backoff ×2)
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

use crate::app::ports::ConnectivityPort;
use crate::config::{SiloConfig, WIFI_ASSOCIATE_TIMEOUT_MS, WIFI_BOOT_POLL_MS};
use crate::error::CommsError;

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connected,
    Reconnecting { attempt: u32, next_try_ms: u64 },
    /// Association requested; waiting for the netif.
    Associating { attempt: u32, deadline_ms: u64 },
}

const INITIAL_BACKOFF_MS: u64 = 2_000;
const MAX_BACKOFF_MS: u64 = 60_000;

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    backoff_ms: u64,
    #[cfg(target_os = "espidf")]
    wifi: BlockingWifi<EspWifi<'static>>,
    /// Simulation: whether the "AP" is reachable.
    #[cfg(not(target_os = "espidf"))]
    sim_link_up: bool,
    /// Simulation: counts association requests, blocking or not.
    #[cfg(not(target_os = "espidf"))]
    sim_connect_counter: u32,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: BlockingWifi<EspWifi<'static>>, config: &SiloConfig) -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: config.wifi_ssid.clone(),
            password: config.wifi_password.clone(),
            backoff_ms: INITIAL_BACKOFF_MS,
            wifi,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(config: &SiloConfig) -> Self {
        Self {
            state: WifiState::Disconnected,
            ssid: config.wifi_ssid.clone(),
            password: config.wifi_password.clone(),
            backoff_ms: INITIAL_BACKOFF_MS,
            sim_link_up: true,
            sim_connect_counter: 0,
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    /// Block until associated. Never gives up; returns an error only if
    /// the driver cannot be configured at all.
    pub fn connect_blocking(&mut self, delay: &mut impl DelayNs) -> Result<(), CommsError> {
        self.platform_configure()?;
        info!("WiFi: connecting to '{}'", self.ssid);

        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.wrapping_add(1);
            match self.platform_connect() {
                Ok(()) => break,
                Err(e) => {
                    if attempts % 10 == 1 {
                        warn!("WiFi: still waiting for '{}' ({e}, attempt {attempts})", self.ssid);
                    }
                    delay.delay_ms(WIFI_BOOT_POLL_MS);
                }
            }
        }

        self.state = WifiState::Connected;
        self.backoff_ms = INITIAL_BACKOFF_MS;
        self.log_ip();
        Ok(())
    }

    /// Supervise the link. Call once per loop iteration; returns without
    /// waiting on the driver.
    pub fn poll(&mut self, now_ms: u64) {
        match self.state {
            WifiState::Connected => {
                if !self.platform_is_connected() {
                    warn!("WiFi: connection lost, retry in {} ms", self.backoff_ms);
                    self.state = WifiState::Reconnecting {
                        attempt: 0,
                        next_try_ms: now_ms + self.backoff_ms,
                    };
                }
            }
            WifiState::Reconnecting {
                attempt,
                next_try_ms,
            } if now_ms >= next_try_ms => {
                let attempt = attempt + 1;
                info!("WiFi: reconnect attempt {attempt} (backoff {} ms)", self.backoff_ms);
                match self.platform_request_connect() {
                    Ok(()) => {
                        self.state = WifiState::Associating {
                            attempt,
                            deadline_ms: now_ms + WIFI_ASSOCIATE_TIMEOUT_MS,
                        };
                    }
                    Err(e) => self.retry_later(attempt, now_ms, e),
                }
            }
            WifiState::Associating {
                attempt,
                deadline_ms,
            } => {
                if self.platform_is_connected() {
                    self.state = WifiState::Connected;
                    self.backoff_ms = INITIAL_BACKOFF_MS;
                    self.log_ip();
                } else if now_ms >= deadline_ms {
                    self.retry_later(attempt, now_ms, CommsError::WifiConnectFailed);
                }
            }
            _ => {}
        }
    }

    fn retry_later(&mut self, attempt: u32, now_ms: u64, cause: CommsError) {
        self.backoff_ms = (self.backoff_ms * 2).min(MAX_BACKOFF_MS);
        warn!(
            "WiFi: attempt {attempt} failed ({cause}), next in {} ms",
            self.backoff_ms
        );
        self.state = WifiState::Reconnecting {
            attempt,
            next_try_ms: now_ms + self.backoff_ms,
        };
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_configure(&mut self) -> Result<(), CommsError> {
        let client = ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| CommsError::WifiConnectFailed)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| CommsError::WifiConnectFailed)?,
            auth_method: if self.password.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        };
        self.wifi
            .set_configuration(&Configuration::Client(client))
            .map_err(|_| CommsError::WifiConnectFailed)?;
        self.wifi.start().map_err(|_| CommsError::WifiConnectFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_configure(&mut self) -> Result<(), CommsError> {
        Ok(())
    }

    /// Associate and wait for an IP. Boot only.
    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), CommsError> {
        self.wifi
            .connect()
            .and_then(|()| self.wifi.wait_netif_up())
            .map_err(|_| CommsError::WifiConnectFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), CommsError> {
        self.sim_connect_counter = self.sim_connect_counter.wrapping_add(1);
        if self.sim_link_up {
            Ok(())
        } else {
            Err(CommsError::WifiConnectFailed)
        }
    }

    /// Start association on the underlying driver and return at once.
    #[cfg(target_os = "espidf")]
    fn platform_request_connect(&mut self) -> Result<(), CommsError> {
        self.wifi
            .wifi_mut()
            .connect()
            .map_err(|_| CommsError::WifiConnectFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_request_connect(&mut self) -> Result<(), CommsError> {
        self.sim_connect_counter = self.sim_connect_counter.wrapping_add(1);
        Ok(())
    }

    /// Associated with an IP on the station netif.
    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.wifi.wifi().is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.sim_link_up
    }

    #[cfg(target_os = "espidf")]
    fn log_ip(&self) {
        match self.wifi.wifi().sta_netif().get_ip_info() {
            Ok(ip) => info!("WiFi: connected, IP {}", ip.ip),
            Err(e) => warn!("WiFi: connected, IP unknown ({e})"),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn log_ip(&self) {
        info!(
            "WiFi(sim): connected to '{}' (attempt {})",
            self.ssid, self.sim_connect_counter
        );
    }

    /// Simulation: make the AP reachable or not.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_link(&mut self, up: bool) {
        self.sim_link_up = up;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_connect_attempts(&self) -> u32 {
        self.sim_connect_counter
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn is_connected(&self) -> bool {
        self.state == WifiState::Connected && self.platform_is_connected()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
