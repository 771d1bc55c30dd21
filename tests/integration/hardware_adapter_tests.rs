//! Integration tests for the HardwareAdapter on the host.
//!
//! The DHT22 line is the simulated single-wire bus, so the real bit-bang
//! decoder runs end to end; the LDR and PIR read their host stubs, which
//! this binary leaves at their defaults (bright room, no motion).

use roomsense::adapters::hardware::HardwareAdapter;
use roomsense::app::ports::{ActuatorPort, SensorPort};
use roomsense::app::service::NodeService;
use roomsense::config::NodeConfig;
use roomsense::drivers::fan::FanDriver;
use roomsense::drivers::indicator::Indicator;
use roomsense::error::{DecodeError, LinePhase};
use roomsense::pins;
use roomsense::sensors::SensorHub;
use roomsense::sensors::dht22::sim::{SimClock, SimDelay, SimLine, frame_bytes};
use roomsense::sensors::dht22::{Dht22, LineTiming};
use roomsense::sensors::light::LightSensor;
use roomsense::sensors::motion::MotionSensor;

use super::mock_hw::RecordingSink;

fn adapter(line: SimLine, clock: SimClock) -> HardwareAdapter<SimLine, SimDelay> {
    let hub = SensorHub::new(
        Dht22::new(line, SimDelay::new(clock), LineTiming::default()),
        LightSensor::new(pins::LDR_ADC_GPIO),
        MotionSensor::new(pins::PIR_GPIO),
    );
    HardwareAdapter::new(
        hub,
        FanDriver::new(),
        Indicator::new(pins::BUZZER_GPIO),
        Indicator::new(pins::LED_GPIO),
    )
}

#[test]
fn snapshot_carries_decoded_climate() {
    let clock = SimClock::new();
    let mut hw = adapter(
        SimLine::responding(clock.clone(), frame_bytes(612, -45)),
        clock,
    );

    let snap = hw.read_all();
    let climate = snap.climate.unwrap();
    assert!((climate.humidity_pct - 61.2).abs() < 1e-4);
    assert!((climate.temperature_c + 4.5).abs() < 1e-4);
    assert!(!snap.motion_detected);
}

#[test]
fn silent_sensor_reports_timeout() {
    let clock = SimClock::new();
    let mut hw = adapter(SimLine::absent(clock.clone()), clock);
    assert_eq!(
        hw.read_all().climate,
        Err(DecodeError::Timeout {
            phase: LinePhase::ResponseLow
        })
    );
}

#[test]
fn actuator_port_drives_drivers() {
    let clock = SimClock::new();
    let mut hw = adapter(SimLine::absent(clock.clone()), clock);

    hw.set_fan_duty(153);
    hw.set_buzzer(true);
    hw.set_led(true);
    assert_eq!(hw.fan().duty(), 153);
    assert!(hw.buzzer().is_on());
    assert!(hw.led().is_on());

    hw.all_off();
    assert!(!hw.fan().is_running());
    assert!(!hw.buzzer().is_on());
    assert!(!hw.led().is_on());
}

#[test]
fn service_ticks_on_simulated_board() {
    let clock = SimClock::new();
    let mut hw = adapter(
        SimLine::responding(clock.clone(), frame_bytes(500, 300)),
        clock,
    );
    let mut sink = RecordingSink::new();
    let mut service = NodeService::new(NodeConfig::default());
    service.start(&mut hw, &mut sink);

    let sample = service.tick(&mut hw, &mut sink);
    assert!((sample.temperature_c - 30.0).abs() < 1e-4);
    assert!((sample.humidity_pct - 50.0).abs() < 1e-4);
    assert_eq!(hw.fan().duty(), 217);
    assert!(!hw.led().is_on());

    // Second transaction on the same line decodes again.
    service.tick(&mut hw, &mut sink);
    assert!(service.status().climate_valid);
    assert_eq!(service.status().session_secs, 2);
}
