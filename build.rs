fn main() {
    println!("cargo:rerun-if-env-changed=SILO_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=SILO_WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=SILO_BOT_TOKEN");
    println!("cargo:rerun-if-env-changed=SILO_CHAT_ID");
    println!("cargo:rerun-if-env-changed=SILO_TELEMETRY_API_KEY");
    println!("cargo:rerun-if-env-changed=SILO_TELEMETRY_HOST");

    // Host builds have no ESP-IDF environment to export.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
