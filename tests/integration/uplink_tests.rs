//! End-to-end host run: the service talking to the real network adapters
//! (simulated WiFi link, Telegram and ThingSpeak request builders).

use silowatch::adapters::log_sink::LogEventSink;
use silowatch::adapters::network::NetworkAdapter;
use silowatch::adapters::telegram::TelegramNotifier;
use silowatch::adapters::thingspeak::ThingSpeakUplink;
use silowatch::adapters::wifi::WifiAdapter;
use silowatch::app::service::SiloService;
use silowatch::config::SiloConfig;

use super::mock_hw::{MockAlarm, MockHardware};

struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn network() -> NetworkAdapter {
    let cfg = SiloConfig::new("SiloNet", "password1", "111:TOKEN", "987", "TSKEY").unwrap();
    let mut wifi = WifiAdapter::new(&cfg);
    wifi.connect_blocking(&mut NoDelay).unwrap();
    NetworkAdapter::new(
        wifi,
        TelegramNotifier::new(&cfg),
        ThingSpeakUplink::new(&cfg),
    )
}

#[test]
fn alert_reaches_telegram_and_record_reaches_thingspeak() {
    let mut app = SiloService::new();
    let mut hw = MockHardware::new();
    let mut alarm = MockAlarm::default();
    let mut net = network();
    let mut sink = LogEventSink::new();
    app.start(&mut hw, &mut sink);

    hw.set(40.0, 120, false);
    app.tick(60_001, &mut hw, &mut alarm, &mut net, &mut sink);

    let urls = net.notifier.sim_sent();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].starts_with("https://api.telegram.org/bot111:TOKEN/sendMessage?chat_id=987&text="));
    assert!(urls[0].contains("CRITICAL%20ALERT"));

    let bodies = net.uplink.sim_posted();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        "api_key=TSKEY&field1=25.00&field2=40.00&field3=120&field4=0"
    );
}

#[test]
fn dropped_link_skips_both_outbound_calls() {
    let mut app = SiloService::new();
    let mut hw = MockHardware::new();
    let mut alarm = MockAlarm::default();
    let mut net = network();
    let mut sink = LogEventSink::new();
    app.start(&mut hw, &mut sink);

    net.wifi.sim_set_link(false);
    net.wifi.poll(60_000);
    hw.set(30.0, 10, true);
    app.tick(60_001, &mut hw, &mut alarm, &mut net, &mut sink);

    assert!(net.notifier.sim_sent().is_empty());
    assert!(net.uplink.sim_posted().is_empty());
}
