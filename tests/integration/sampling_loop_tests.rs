//! Integration tests for the SamplingLoop → NodeService → ports → TelemetryHub
//! pipeline.
//!
//! Every tick is driven by hand through `run_tick`, so the scenarios are
//! deterministic and never sleep.

use roomsense::app::events::AppEvent;
use roomsense::app::sampler::SamplingLoop;
use roomsense::app::service::NodeService;
use roomsense::config::NodeConfig;
use roomsense::fsm::StateId;
use roomsense::history::HISTORY_CAPACITY;
use roomsense::telemetry::TelemetryHub;

use super::mock_hw::{ActuatorCall, MockHardware, RecordingSink, reading, timed_out};

fn make_loop(hub: &TelemetryHub) -> SamplingLoop<'_, MockHardware, RecordingSink> {
    let service = NodeService::new(NodeConfig::default());
    let mut sampler = SamplingLoop::new(service, MockHardware::new(), RecordingSink::new(), hub);
    sampler.start();
    sampler
}

fn run(sampler: &mut SamplingLoop<'_, MockHardware, RecordingSink>, ticks: usize) {
    for _ in 0..ticks {
        sampler.run_tick();
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_drives_outputs_off_and_opens_session() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);

    assert_eq!(
        sampler.hardware().calls,
        vec![
            ActuatorCall::AllOff,
            ActuatorCall::SetLed(false),
            ActuatorCall::SetBuzzer(false),
            ActuatorCall::SetFanDuty(0),
        ]
    );
    assert_eq!(
        sampler.sink().events,
        vec![AppEvent::Started(StateId::SessionActive)]
    );
    assert_eq!(sampler.service().state(), StateId::SessionActive);
}

// ── Occupancy scenario ────────────────────────────────────────

#[test]
fn absence_sounds_buzzer_and_motion_restarts_session() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);

    sampler.hardware().queue(reading(25.0, 80.0, true), 3);
    run(&mut sampler, 3);
    assert_eq!(sampler.service().occupancy().session_secs, 3);
    assert_eq!(sampler.hardware().fan_duty(), 153);

    // Nine quiet seconds still count towards the session.
    sampler.hardware().queue(reading(25.0, 80.0, false), 9);
    run(&mut sampler, 9);
    assert_eq!(sampler.service().occupancy().session_secs, 12);
    assert!(!sampler.hardware().buzzer_on());

    // The tenth trips the absence threshold.
    sampler.hardware().queue(reading(25.0, 80.0, false), 1);
    run(&mut sampler, 1);
    assert_eq!(sampler.service().state(), StateId::Alarmed);
    assert!(sampler.hardware().buzzer_on());

    let status = hub.snapshot().status;
    assert!(status.buzzer_on);
    assert!(!status.session_active);
    assert_eq!(status.session_secs, 0);

    // Staying away keeps the session at zero.
    sampler.hardware().queue(reading(25.0, 80.0, false), 5);
    run(&mut sampler, 5);
    assert_eq!(sampler.service().occupancy().session_secs, 0);
    assert!(sampler.hardware().buzzer_on());

    // Motion silences the buzzer and the restart tick counts.
    sampler.hardware().queue(reading(25.0, 80.0, true), 1);
    run(&mut sampler, 1);
    assert_eq!(sampler.service().state(), StateId::SessionActive);
    assert!(!sampler.hardware().buzzer_on());
    assert_eq!(sampler.service().occupancy().session_secs, 1);

    let transitions: Vec<_> = sampler
        .sink()
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (StateId::SessionActive, StateId::Alarmed),
            (StateId::Alarmed, StateId::SessionActive),
        ]
    );
}

#[test]
fn dark_room_turns_led_on_after_delay() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);

    sampler.hardware().queue(reading(22.0, 20.0, true), 4);
    run(&mut sampler, 4);
    assert!(!sampler.hardware().led_on());

    sampler.hardware().queue(reading(22.0, 20.0, true), 1);
    run(&mut sampler, 1);
    assert!(sampler.hardware().led_on());
    assert!(hub.snapshot().status.led_on);

    sampler.hardware().queue(reading(22.0, 75.0, true), 1);
    run(&mut sampler, 1);
    assert!(!sampler.hardware().led_on());
}

// ── Climate failures ──────────────────────────────────────────

#[test]
fn failed_reads_keep_last_climate_and_fan_speed() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);

    sampler.hardware().queue(reading(35.0, 80.0, true), 1);
    sampler.hardware().queue(timed_out(80.0, true), 3);
    run(&mut sampler, 4);

    assert_eq!(sampler.hardware().fan_duty(), 255);
    assert_eq!(
        sampler
            .sink()
            .count(|e| matches!(e, AppEvent::ClimateReadFailed(_))),
        3
    );

    let snapshot = hub.snapshot();
    assert!(snapshot.status.climate_valid);
    assert!(
        snapshot
            .history
            .iter()
            .all(|s| (s.temperature_c - 35.0).abs() < f32::EPSILON)
    );
    assert_eq!(snapshot.history.len(), 4);
}

#[test]
fn fan_waits_for_first_good_reading() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);

    sampler.hardware().queue(timed_out(80.0, true), 2);
    run(&mut sampler, 2);
    assert_eq!(sampler.hardware().fan_duty(), 0);
    assert!(!hub.snapshot().status.climate_valid);

    sampler.hardware().queue(reading(30.0, 80.0, true), 1);
    run(&mut sampler, 1);
    assert_eq!(sampler.hardware().fan_duty(), 217);
}

// ── Telemetry hub ─────────────────────────────────────────────

#[test]
fn hub_keeps_the_newest_minute_oldest_first() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);

    for i in 0..70u8 {
        sampler
            .hardware()
            .queue(reading(f32::from(i), 80.0, true), 1);
    }
    run(&mut sampler, 70);

    let snapshot = hub.snapshot();
    assert_eq!(snapshot.history.len(), HISTORY_CAPACITY);
    let temps: Vec<f32> = snapshot.history.iter().map(|s| s.temperature_c).collect();
    let expected: Vec<f32> = (10..70u8).map(f32::from).collect();
    assert_eq!(temps, expected);
    assert!((snapshot.status.temperature_c - 69.0).abs() < f32::EPSILON);
}

#[test]
fn telemetry_json_reflects_latest_tick() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);

    sampler.hardware().queue(reading(25.0, 62.5, true), 1);
    sampler.hardware().queue(reading(25.0, 62.5, false), 1);
    sampler.hardware().queue(reading(25.0, 62.5, true), 1);
    run(&mut sampler, 3);

    let json = hub.snapshot().to_json().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(doc["temperature"], 25.0);
    assert_eq!(doc["temperatureF"], 77.0);
    assert_eq!(doc["humidity"], 45.0);
    assert_eq!(doc["ldrValue"], 2048);
    assert_eq!(doc["lightPercentage"], 62.5);
    assert_eq!(doc["motionDetected"], true);
    assert_eq!(doc["motionCount"], 2);
    assert_eq!(doc["fanSpeed"], 153);
    assert_eq!(doc["sessionActive"], true);
    assert_eq!(doc["sessionSeconds"], 3);
    assert_eq!(doc["historyCount"], 3);
    assert_eq!(doc["motionHistory"], serde_json::json!([1, 0, 1]));
    assert_eq!(doc["tempHistory"].as_array().map(Vec::len), Some(3));
}

#[test]
fn telemetry_event_closes_every_tick() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);

    sampler.hardware().queue(timed_out(10.0, false), 1);
    run(&mut sampler, 1);
    assert!(matches!(
        sampler.sink().events.last(),
        Some(AppEvent::Telemetry(_))
    ));
}
