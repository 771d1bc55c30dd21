//! Mock hardware adapter for integration tests.
//!
//! Plays back a script of sensor snapshots and records every actuator
//! call so tests can assert on the full command history without touching
//! real GPIO/PWM registers.

use std::collections::VecDeque;

use roomsense::app::events::AppEvent;
use roomsense::app::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};
use roomsense::error::{DecodeError, LinePhase};
use roomsense::sensors::SensorSnapshot;
use roomsense::sensors::dht22::Reading;

// ── Snapshot builders ─────────────────────────────────────────

pub fn reading(temperature_c: f32, light_percent: f32, motion: bool) -> SensorSnapshot {
    SensorSnapshot {
        climate: Ok(Reading {
            temperature_c,
            humidity_pct: 45.0,
        }),
        ldr_raw: 2048,
        light_percent,
        motion_detected: motion,
    }
}

pub fn timed_out(light_percent: f32, motion: bool) -> SensorSnapshot {
    SensorSnapshot {
        climate: Err(DecodeError::Timeout {
            phase: LinePhase::ResponseLow,
        }),
        ldr_raw: 2048,
        light_percent,
        motion_detected: motion,
    }
}

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    SetLed(bool),
    SetBuzzer(bool),
    SetFanDuty(u8),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    script: VecDeque<SensorSnapshot>,
    /// Returned once the script runs dry.
    pub idle: SensorSnapshot,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            idle: reading(22.0, 80.0, true),
            calls: Vec::new(),
        }
    }

    pub fn queue(&mut self, snapshot: SensorSnapshot, ticks: usize) {
        for _ in 0..ticks {
            self.script.push_back(snapshot);
        }
    }

    pub fn led_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetLed(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetBuzzer(on) => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn fan_duty(&self) -> u8 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetFanDuty(duty) => Some(*duty),
                ActuatorCall::AllOff => Some(0),
                _ => None,
            })
            .unwrap_or(0)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.script.pop_front().unwrap_or(self.idle)
    }
}

impl ActuatorPort for MockHardware {
    fn set_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetLed(on));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetBuzzer(on));
    }

    fn set_fan_duty(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::SetFanDuty(duty));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Character display ─────────────────────────────────────────

/// Two rows of text, updated the way a real 16x2 panel would be.
#[derive(Default)]
pub struct MockDisplay {
    pub rows: [String; 2],
    pub clears: usize,
}

impl DisplayPort for MockDisplay {
    fn clear(&mut self) {
        self.clears += 1;
        self.rows = Default::default();
    }

    fn write_line(&mut self, row: u8, text: &str) {
        if let Some(slot) = self.rows.get_mut(usize::from(row)) {
            *slot = text.chars().take(16).collect();
        }
    }
}
