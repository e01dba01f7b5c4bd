//! Telegram bot notifier.
//!
//! Implements [`NotifierPort`] with one HTTPS GET per message against the
//! Bot API `sendMessage` method. The server certificate is checked
//! against the ESP-IDF certificate bundle.
//!
//! On host targets the request is not sent; the URL is recorded so tests
//! can inspect it.

use heapless::String as HString;
use log::{info, warn};

use crate::app::ports::NotifierPort;
use crate::config::SiloConfig;
use crate::error::CommsError;

const API_BASE: &str = "https://api.telegram.org";

pub struct TelegramNotifier {
    bot_token: HString<64>,
    chat_id: HString<24>,
    #[cfg(not(target_os = "espidf"))]
    sim_sent: Vec<String>,
    #[cfg(not(target_os = "espidf"))]
    sim_status: u16,
}

impl TelegramNotifier {
    pub fn new(config: &SiloConfig) -> Self {
        Self {
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            #[cfg(not(target_os = "espidf"))]
            sim_sent: Vec::new(),
            #[cfg(not(target_os = "espidf"))]
            sim_status: 200,
        }
    }

    /// Full request URL for `text`. Chat id and text are percent-encoded.
    pub fn message_url(&self, text: &str) -> String {
        format!(
            "{API_BASE}/bot{}/sendMessage?chat_id={}&text={}",
            self.bot_token,
            urlencoding::encode(&self.chat_id),
            urlencoding::encode(text)
        )
    }

    #[cfg(target_os = "espidf")]
    fn get(&self, url: &str) -> Result<u16, CommsError> {
        use embedded_svc::http::client::Client;
        use esp_idf_svc::http::client::{Configuration as HttpConfig, EspHttpConnection};

        let connection = EspHttpConnection::new(&HttpConfig {
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        })
        .map_err(|_| CommsError::Transport)?;
        let mut client = Client::wrap(connection);
        let request = client.get(url).map_err(|_| CommsError::Transport)?;
        let response = request.submit().map_err(|_| CommsError::Transport)?;
        Ok(response.status())
    }

    #[cfg(not(target_os = "espidf"))]
    fn get(&mut self, url: &str) -> Result<u16, CommsError> {
        self.sim_sent.push(url.to_owned());
        Ok(self.sim_status)
    }

    /// Simulation: status code the fake API answers with.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_status(&mut self, status: u16) {
        self.sim_status = status;
    }

    /// Simulation: every URL requested so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_sent(&self) -> &[String] {
        &self.sim_sent
    }
}

impl NotifierPort for TelegramNotifier {
    fn send(&mut self, text: &str) -> Result<(), CommsError> {
        let url = self.message_url(text);
        match self.get(&url)? {
            200 => {
                info!("Telegram: message delivered");
                Ok(())
            }
            code => {
                warn!("Telegram: API answered {code}");
                Err(CommsError::HttpStatus(code))
            }
        }
    }
}
