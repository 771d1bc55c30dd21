//! Integration tests for the character-display path: service events fanned
//! out to a recorder and a `DisplayEventSink` at the same time.

use roomsense::adapters::display_sink::DisplayEventSink;
use roomsense::app::sampler::SamplingLoop;
use roomsense::app::service::NodeService;
use roomsense::config::NodeConfig;
use roomsense::telemetry::TelemetryHub;

use super::mock_hw::{MockDisplay, MockHardware, RecordingSink, reading};

type Sink = (RecordingSink, DisplayEventSink<MockDisplay>);

fn make_loop(hub: &TelemetryHub) -> SamplingLoop<'_, MockHardware, Sink> {
    let service = NodeService::new(NodeConfig::default());
    let sink = (
        RecordingSink::new(),
        DisplayEventSink::new(MockDisplay::default()),
    );
    let mut sampler = SamplingLoop::new(service, MockHardware::new(), sink, hub);
    sampler.start();
    sampler
}

fn rows(sampler: &mut SamplingLoop<'_, MockHardware, Sink>) -> [String; 2] {
    sampler.sink().1.display().rows.clone()
}

#[test]
fn boot_shows_zeroed_session_clock() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);
    assert_eq!(rows(&mut sampler), ["Session Time:", "    00:00:00"]);
    assert_eq!(sampler.sink().1.display().clears, 1);
}

#[test]
fn clock_ticks_while_present() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);
    sampler.hardware().queue(reading(22.0, 80.0, true), 2);
    sampler.run_tick();
    sampler.run_tick();
    assert_eq!(rows(&mut sampler)[1], "    00:00:02    ");
}

#[test]
fn absence_and_return_swap_screens() {
    let hub = TelemetryHub::new();
    let mut sampler = make_loop(&hub);

    sampler.hardware().queue(reading(22.0, 80.0, false), 10);
    for _ in 0..10 {
        sampler.run_tick();
    }
    assert_eq!(rows(&mut sampler), ["User Away!", "Session Reset"]);

    // The away screen is not overwritten while nobody is there.
    sampler.hardware().queue(reading(22.0, 80.0, false), 3);
    for _ in 0..3 {
        sampler.run_tick();
    }
    assert_eq!(rows(&mut sampler)[0], "User Away!");

    sampler.hardware().queue(reading(22.0, 80.0, true), 1);
    sampler.run_tick();
    assert_eq!(rows(&mut sampler), ["Session Time:", "    00:00:01    "]);

    // Both halves of the fan-out saw the same event stream.
    assert!(!sampler.sink().0.events.is_empty());
}
