//! RoomSense Firmware: Main Entry Point
//!
//! Hexagonal architecture around a 1 Hz sampling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink     DisplayEventSink    │
//! │  (Sensor+Actuator)        (EventSink)      (EventSink → LCD)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              NodeService (pure logic)                  │    │
//! │  │  Occupancy FSM · Light rule · Fan curve                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  SamplingLoop ──publish──▶ TelemetryHub ◀──snapshot── reporter │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use roomsense::adapters::display_sink::DisplayEventSink;
use roomsense::adapters::hardware::HardwareAdapter;
use roomsense::adapters::log_sink::LogEventSink;
use roomsense::app::sampler::SamplingLoop;
use roomsense::app::service::NodeService;
use roomsense::config::NodeConfig;
use roomsense::drivers::fan::FanDriver;
use roomsense::drivers::hw_init;
use roomsense::drivers::indicator::Indicator;
use roomsense::drivers::lcd::{self, Lcd1602};
use roomsense::pins;
use roomsense::sensors::SensorHub;
use roomsense::sensors::dht22::Dht22;
use roomsense::sensors::light::LightSensor;
use roomsense::sensors::motion::MotionSensor;
use roomsense::telemetry::TelemetryHub;

/// Written by the sampling loop, read by the reporter thread.
static TELEMETRY: TelemetryHub = TelemetryHub::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RoomSense v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = NodeConfig::default();
    config.validate()?;

    // ── 2. Raw peripherals (ADC, PIR, buzzer, LED, fan PWM) ───
    hw_init::init_peripherals()?;
    let peripherals = Peripherals::take()?;

    // ── 3. DHT22 single-wire line (open-drain, pulled up) ─────
    let mut dht_pin = PinDriver::input_output_od(peripherals.pins.gpio4)?;
    dht_pin.set_pull(Pull::Up)?;
    dht_pin.set_high()?;
    let dht = Dht22::new(dht_pin, Ets, config.dht);

    // ── 4. LCD on I²C ─────────────────────────────────────────
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let mut i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &i2c_config,
    )?;
    if !lcd::scan_bus(&mut i2c).contains(&pins::LCD_I2C_ADDR) {
        warn!("LCD not found at 0x{:02X}", pins::LCD_I2C_ADDR);
    }
    let mut lcd = Lcd1602::new(i2c, FreeRtos, pins::LCD_I2C_ADDR);
    if let Err(e) = lcd.init() {
        warn!("LCD init failed ({:?}), continuing without display", e);
    }

    // ── 5. Adapters ───────────────────────────────────────────
    let sensor_hub = SensorHub::new(
        dht,
        LightSensor::new(pins::LDR_ADC_GPIO),
        MotionSensor::new(pins::PIR_GPIO),
    );
    let hw = HardwareAdapter::new(
        sensor_hub,
        FanDriver::new(),
        Indicator::new(pins::BUZZER_GPIO),
        Indicator::new(pins::LED_GPIO),
    );
    let sink = (LogEventSink::new(), DisplayEventSink::new(lcd));

    // ── 6. Telemetry reporter ─────────────────────────────────
    let report_every = Duration::from_secs(u64::from(config.telemetry_interval_secs));
    std::thread::Builder::new()
        .name("telemetry".into())
        .stack_size(8 * 1024)
        .spawn(move || {
            loop {
                std::thread::sleep(report_every);
                match TELEMETRY.snapshot().to_json() {
                    Ok(json) => info!("TELEMETRY {}", json),
                    Err(e) => warn!("Telemetry encode failed: {}", e),
                }
            }
        })?;

    // ── 7. Sampling loop ──────────────────────────────────────
    let service = NodeService::new(config);
    let mut sampler = SamplingLoop::new(service, hw, sink, &TELEMETRY);
    sampler.start();

    info!("System ready. Entering sampling loop.");
    sampler.run()
}
