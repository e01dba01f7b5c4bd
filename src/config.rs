//! System configuration parameters
//!
//! Alarm thresholds and loop timing are fixed at compile time. Deployment
//! secrets (network credentials, bot token, telemetry key) are injected
//! through [`SiloConfig`], either from `SILO_*` build environment variables
//! or from a JSON document.

use core::fmt;

use serde::{Deserialize, Serialize};

// --- Thresholds ---

/// Humidity (%) above which the exhaust fan runs.
pub const FAN_HUMIDITY_PCT: f32 = 50.0;
/// Gas level (raw 10-bit ADC) above which the exhaust fan runs.
pub const FAN_GAS_LEVEL: u16 = 90;
/// Gas level (raw 10-bit ADC) that signals spoilage.
pub const SPOILAGE_GAS_LEVEL: u16 = 90;
/// Humidity (%) that signals spoilage. Also guards the high-humidity branch.
pub const SPOILAGE_HUMIDITY_PCT: f32 = 60.0;

// --- Timing ---

/// Minimum gap between two outbound notifications, any alert kind.
pub const NOTIFY_COOLDOWN_MS: u64 = 60_000;
/// Telemetry upload period.
pub const TELEMETRY_INTERVAL_MS: u64 = 20_000;
/// Idle delay at the end of every loop iteration.
pub const LOOP_DELAY_MS: u32 = 100;
/// Poll period while waiting for the boot-time WiFi association.
pub const WIFI_BOOT_POLL_MS: u32 = 500;
/// How long a background reconnect may take before it counts as failed.
pub const WIFI_ASSOCIATE_TIMEOUT_MS: u64 = 10_000;
/// The DHT11 cannot be sampled faster than this; reads inside the window
/// return the previous result.
pub const DHT_MIN_INTERVAL_MS: u64 = 2_000;
/// Dashboard page auto-refresh period.
pub const DASHBOARD_REFRESH_SECS: u8 = 2;

/// Default telemetry ingestion host.
pub const DEFAULT_TELEMETRY_HOST: &str = "api.thingspeak.com";
/// Default dashboard HTTP port.
pub const DEFAULT_DASHBOARD_PORT: u16 = 80;

/// Injectable deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiloConfig {
    // --- Network ---
    pub wifi_ssid: heapless::String<32>,
    pub wifi_password: heapless::String<64>,

    // --- Notification collaborator ---
    pub bot_token: heapless::String<64>,
    pub chat_id: heapless::String<24>,

    // --- Telemetry collaborator ---
    pub telemetry_api_key: heapless::String<32>,
    #[serde(default = "default_telemetry_host")]
    pub telemetry_host: heapless::String<64>,

    // --- Dashboard ---
    #[serde(default = "default_dashboard_port")]
    pub dashboard_port: u16,
}

fn default_telemetry_host() -> heapless::String<64> {
    let mut s = heapless::String::new();
    // Fits: the constant is well under 64 bytes.
    let _ = s.push_str(DEFAULT_TELEMETRY_HOST);
    s
}

fn default_dashboard_port() -> u16 {
    DEFAULT_DASHBOARD_PORT
}

/// Errors from building or validating a [`SiloConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A field is longer than its fixed-capacity storage.
    TooLong(&'static str),
    /// A field failed validation. The string names the field.
    Invalid(&'static str),
    /// The JSON document could not be parsed.
    Malformed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong(field) => write!(f, "{} is too long", field),
            Self::Invalid(field) => write!(f, "{} is invalid", field),
            Self::Malformed => write!(f, "config document is malformed"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::TooLong(field) | ConfigError::Invalid(field) => Self::Config(field),
            ConfigError::Malformed => Self::Config("malformed document"),
        }
    }
}

fn bounded<const N: usize>(
    value: &str,
    field: &'static str,
) -> Result<heapless::String<N>, ConfigError> {
    let mut s = heapless::String::new();
    s.push_str(value).map_err(|_| ConfigError::TooLong(field))?;
    Ok(s)
}

impl SiloConfig {
    /// Build a config from explicit values.
    pub fn new(
        wifi_ssid: &str,
        wifi_password: &str,
        bot_token: &str,
        chat_id: &str,
        telemetry_api_key: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            wifi_ssid: bounded(wifi_ssid, "wifi_ssid")?,
            wifi_password: bounded(wifi_password, "wifi_password")?,
            bot_token: bounded(bot_token, "bot_token")?,
            chat_id: bounded(chat_id, "chat_id")?,
            telemetry_api_key: bounded(telemetry_api_key, "telemetry_api_key")?,
            telemetry_host: default_telemetry_host(),
            dashboard_port: DEFAULT_DASHBOARD_PORT,
        })
    }

    /// Build from the `SILO_*` variables captured at compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::new(
            option_env!("SILO_WIFI_SSID").unwrap_or(""),
            option_env!("SILO_WIFI_PASSWORD").unwrap_or(""),
            option_env!("SILO_BOT_TOKEN").unwrap_or(""),
            option_env!("SILO_CHAT_ID").unwrap_or(""),
            option_env!("SILO_TELEMETRY_API_KEY").unwrap_or(""),
        )?;
        if let Some(host) = option_env!("SILO_TELEMETRY_HOST") {
            cfg.telemetry_host = bounded(host, "telemetry_host")?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the firmware cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wifi_ssid.is_empty() || !is_printable_ascii(&self.wifi_ssid) {
            return Err(ConfigError::Invalid("wifi_ssid"));
        }
        // Empty = open network; otherwise WPA2 requires 8-64 bytes.
        let pw_len = self.wifi_password.len();
        if pw_len != 0 && pw_len < 8 {
            return Err(ConfigError::Invalid("wifi_password"));
        }
        if self.bot_token.is_empty() {
            return Err(ConfigError::Invalid("bot_token"));
        }
        if self.chat_id.is_empty() {
            return Err(ConfigError::Invalid("chat_id"));
        }
        if self.telemetry_api_key.is_empty() {
            return Err(ConfigError::Invalid("telemetry_api_key"));
        }
        if self.telemetry_host.is_empty() || self.telemetry_host.contains('/') {
            return Err(ConfigError::Invalid("telemetry_host"));
        }
        if self.dashboard_port == 0 {
            return Err(ConfigError::Invalid("dashboard_port"));
        }
        Ok(())
    }
}

pub(crate) fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}
