//! SiloWatch Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    BlockingAlarm   NetworkAdapter             │
//! │  (Sensor+Actuator)  (Alarm)         (WiFi+Telegram+ThingSpeak) │
//! │  LogEventSink       DashboardServer UptimeClock                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              SiloService (pure logic)                  │    │
//! │  │  fuse · fan · alert · notify gate · telemetry          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::info;

use silowatch::adapters::dashboard::{DashboardServer, DashboardView};
use silowatch::adapters::hardware::HardwareAdapter;
use silowatch::adapters::log_sink::LogEventSink;
use silowatch::adapters::network::NetworkAdapter;
use silowatch::adapters::telegram::TelegramNotifier;
use silowatch::adapters::thingspeak::ThingSpeakUplink;
use silowatch::adapters::time::UptimeClock;
use silowatch::adapters::wifi::WifiAdapter;
use silowatch::app::ports::AlarmPort;
use silowatch::app::service::SiloService;
use silowatch::config::{LOOP_DELAY_MS, SiloConfig};
use silowatch::drivers::buzzer::BlockingAlarm;
use silowatch::drivers::hw_init::{self, GpioOpenDrain, GpioOutput};
use silowatch::drivers::relay::FanRelay;
use silowatch::error::Error;
use silowatch::pins;
use silowatch::sensors::SensorHub;
use silowatch::sensors::dht11::Dht11;
use silowatch::sensors::gas::GasSensor;
use silowatch::sensors::motion::MotionSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SiloWatch v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SiloConfig::from_build_env()?;

    // ── 3. Peripherals, fan forced off before anything can block ──
    hw_init::init_peripherals()?;

    let hub = SensorHub::new(
        Dht11::new(GpioOpenDrain::new(pins::DHT_GPIO), Ets),
        GasSensor::new(),
        MotionSensor::new(),
    );
    let mut hw = HardwareAdapter::new(hub, FanRelay::new());
    let mut alarm = BlockingAlarm::new(GpioOutput::new(pins::BUZZER_GPIO), FreeRtos);
    alarm.silence();

    let mut sink = LogEventSink::new();
    let mut service = SiloService::new();
    service.start(&mut hw, &mut sink);

    // ── 4. Network (blocks until associated) ──────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let wifi = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?;
    let mut wifi = WifiAdapter::new(wifi, &config);
    wifi.connect_blocking(&mut FreeRtos).map_err(Error::from)?;

    let mut net = NetworkAdapter::new(
        wifi,
        TelegramNotifier::new(&config),
        ThingSpeakUplink::new(&config),
    );

    // ── 5. Dashboard ──────────────────────────────────────────
    let view = DashboardView::new();
    view.publish(service.build_telemetry());
    let _dashboard = DashboardServer::start(config.dashboard_port, view.clone())?;

    // ── 6. Control loop ───────────────────────────────────────
    let clock = UptimeClock::new();
    info!("Entering control loop ({} ms period)", LOOP_DELAY_MS);
    loop {
        service.tick(clock.uptime_ms(), &mut hw, &mut alarm, &mut net, &mut sink);
        view.publish(service.build_telemetry());
        net.wifi.poll(clock.uptime_ms());
        FreeRtos::delay_ms(LOOP_DELAY_MS);
    }
}
