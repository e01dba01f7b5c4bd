//! Bundles the three network-facing adapters so the service can borrow
//! them as one `impl ConnectivityPort + NotifierPort + TelemetryPort`.

use crate::app::events::TelemetryData;
use crate::app::ports::{ConnectivityPort, NotifierPort, TelemetryPort};
use crate::error::CommsError;

use super::telegram::TelegramNotifier;
use super::thingspeak::ThingSpeakUplink;
use super::wifi::WifiAdapter;

pub struct NetworkAdapter {
    pub wifi: WifiAdapter,
    pub notifier: TelegramNotifier,
    pub uplink: ThingSpeakUplink,
}

impl NetworkAdapter {
    pub fn new(wifi: WifiAdapter, notifier: TelegramNotifier, uplink: ThingSpeakUplink) -> Self {
        Self {
            wifi,
            notifier,
            uplink,
        }
    }
}

impl ConnectivityPort for NetworkAdapter {
    fn is_connected(&self) -> bool {
        self.wifi.is_connected()
    }
}

impl NotifierPort for NetworkAdapter {
    fn send(&mut self, text: &str) -> Result<(), CommsError> {
        self.notifier.send(text)
    }
}

impl TelemetryPort for NetworkAdapter {
    fn upload(&mut self, data: &TelemetryData) -> Result<(), CommsError> {
        self.uplink.upload(data)
    }
}
