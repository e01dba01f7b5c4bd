//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements         | Connects to              |
//! |--------------|--------------------|--------------------------|
//! | `hardware`   | SensorPort         | DHT11, MQ ADC, PIR GPIO  |
//! |              | ActuatorPort       | Fan relay GPIO           |
//! | `wifi`       | ConnectivityPort   | ESP-IDF WiFi STA         |
//! | `telegram`   | NotifierPort       | Telegram Bot API (HTTPS) |
//! | `thingspeak` | TelemetryPort      | ThingSpeak update (HTTP) |
//! | `network`    | all three above    | bundle of the three      |
//! | `log_sink`   | EventSink          | Serial log output        |
//! | `dashboard`  | —                  | ESP-IDF HTTP server      |
//! | `time`       | —                  | ESP32 system timer       |

pub mod dashboard;
pub mod hardware;
pub mod log_sink;
pub mod network;
pub mod telegram;
pub mod thingspeak;
pub mod time;
pub mod wifi;
