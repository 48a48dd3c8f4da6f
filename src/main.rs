//! AquaSense Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-cadence sampling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   SerialUplink   Esp32Time     │
//! │  (SensorPort)      (EventSink)    (Transport)    (DelayNs)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MonitorService (pure logic)                 │    │
//! │  │  Sampler · Classifier · Alerts · Uplink encoder        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use aquasense::adapters::hardware::HardwareAdapter;
use aquasense::adapters::log_sink::LogEventSink;
use aquasense::adapters::serial_uplink::SerialUplink;
use aquasense::adapters::time::{remaining_in_period, BlockingDelay, Esp32TimeAdapter};
use aquasense::app::service::MonitorService;
use aquasense::config::SystemConfig;
use aquasense::drivers::{hw_init, watchdog};
use aquasense::pins;
use aquasense::sensors::ph::PhProbe;
use aquasense::sensors::temperature::TemperatureProbe;
use aquasense::sensors::turbidity::TurbidityProbe;
use aquasense::sensors::SensorHub;
use embedded_hal::delay::DelayNs;

/// Optional build-time override, e.g.
/// `AQUASENSE_CONFIG='{"cycle_interval_ms":10000,...}' cargo build`.
const CONFIG_OVERRIDE: Option<&str> = option_env!("AQUASENSE_CONFIG");

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AquaSense v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    if CONFIG_OVERRIDE.is_some() {
        info!("Config: build-time override");
    }
    let config = match SystemConfig::load(CONFIG_OVERRIDE) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("config: {}, using defaults", e);
            SystemConfig::default()
        }
    };

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(aquasense::error::Error::from)?;
    let watchdog = watchdog::Watchdog::new(watchdog::timeout_for(&config));

    let sensor_hub = SensorHub::new(
        PhProbe::new(pins::PH_ADC_GPIO),
        TurbidityProbe::new(pins::TURBIDITY_ADC_GPIO),
        TemperatureProbe::new(pins::TEMP_ADC_GPIO),
    );
    let mut hw = HardwareAdapter::new(sensor_hub);
    let mut uplink = SerialUplink::new();
    let mut sink = LogEventSink::new();
    let mut delay = BlockingDelay;
    let time = Esp32TimeAdapter::new();

    // ── 4. Service ────────────────────────────────────────────
    let cycle_interval_ms = config.cycle_interval_ms;
    let mut service = MonitorService::new(config);
    service.start(&mut sink);

    // ── 5. Sampling loop ──────────────────────────────────────
    loop {
        let cycle_start_ms = time.uptime_ms();

        service.run_cycle(&mut hw, &mut delay, &mut uplink, &mut sink);
        watchdog.feed();

        let elapsed_ms = time.uptime_ms().saturating_sub(cycle_start_ms);
        let sleep_ms = remaining_in_period(cycle_interval_ms, elapsed_ms);
        if sleep_ms == 0 {
            warn!("Cycle overran its period ({} ms > {} ms)", elapsed_ms, cycle_interval_ms);
        }
        delay.delay_ms(sleep_ms);
        watchdog.feed();
    }
}
