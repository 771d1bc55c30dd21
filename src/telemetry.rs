//! Shared telemetry state and the exported JSON document.
//!
//! The sampling loop is the only writer: once per tick it publishes the
//! node status together with that tick's history sample.  Any number of
//! readers (the reporter task, a future HTTP handler) call
//! [`TelemetryHub::snapshot`], which copies status and ring under the same
//! lock, so a reader never sees a ring mid-rotation or a status from a
//! different tick than the newest history slot.
//!
//! ```text
//!  SamplingLoop ──publish()──▶ ┌──────────────────────┐
//!                              │ TelemetryHub (mutex) │ ──snapshot()──▶ reporter
//!                              │  status + ring<60>   │
//!                              └──────────────────────┘
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::CriticalSectionMutex;
use serde::Serialize;

use crate::app::events::NodeStatus;
use crate::history::{HISTORY_CAPACITY, HistoryRing, HistorySample};

// ── Hub ─────────────────────────────────────────────────────────────

struct Shared {
    status: NodeStatus,
    history: HistoryRing<HISTORY_CAPACITY>,
}

/// Lock-protected status + history, suitable for a `static`.
pub struct TelemetryHub {
    inner: CriticalSectionMutex<RefCell<Shared>>,
}

impl TelemetryHub {
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionMutex::new(RefCell::new(Shared {
                status: NodeStatus::new(),
                history: HistoryRing::new(),
            })),
        }
    }

    /// Record one tick: the status after the tick and its history sample.
    pub fn publish(&self, status: NodeStatus, sample: HistorySample) {
        self.inner.lock(|cell| {
            let mut shared = cell.borrow_mut();
            shared.status = status;
            shared.history.push(sample);
        });
    }

    /// Copy out a consistent point-in-time view.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.inner.lock(|cell| {
            let shared = cell.borrow();
            TelemetrySnapshot {
                status: shared.status,
                history: shared.history,
            }
        })
    }
}

impl Default for TelemetryHub {
    fn default() -> Self {
        Self::new()
    }
}

// ── Snapshot ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct TelemetrySnapshot {
    pub status: NodeStatus,
    pub history: HistoryRing<HISTORY_CAPACITY>,
}

impl TelemetrySnapshot {
    /// Render the fixed dashboard schema.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.document())
    }

    fn document(&self) -> TelemetryDocument {
        let s = &self.status;
        let history = &self.history;

        // Each history Vec has the ring's capacity, so collecting cannot overflow.
        TelemetryDocument {
            temperature: round1(s.temperature_c),
            temperature_f: round1(s.temperature_f()),
            humidity: round1(s.humidity_pct),
            ldr_value: s.ldr_raw,
            light_percentage: round1(s.light_percent),
            motion_detected: s.motion_detected,
            motion_count: s.motion_count,
            led_on: s.led_on,
            buzzer_on: s.buzzer_on,
            fan_speed: s.fan_duty,
            session_active: s.session_active,
            session_seconds: s.session_secs,
            temp_history: history.iter().map(|h| round1(h.temperature_c)).collect(),
            humid_history: history.iter().map(|h| round1(h.humidity_pct)).collect(),
            light_history: history.iter().map(|h| round1(h.light_percent)).collect(),
            motion_history: history.iter().map(|h| u8::from(h.motion)).collect(),
            history_count: history.len(),
        }
    }
}

/// Wire form.  Field names are consumed by the dashboard and must not change.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TelemetryDocument {
    temperature: f32,
    #[serde(rename = "temperatureF")]
    temperature_f: f32,
    humidity: f32,
    ldr_value: u16,
    light_percentage: f32,
    motion_detected: bool,
    motion_count: u32,
    led_on: bool,
    buzzer_on: bool,
    fan_speed: u8,
    session_active: bool,
    session_seconds: u32,
    temp_history: heapless::Vec<f32, HISTORY_CAPACITY>,
    humid_history: heapless::Vec<f32, HISTORY_CAPACITY>,
    light_history: heapless::Vec<f32, HISTORY_CAPACITY>,
    motion_history: heapless::Vec<u8, HISTORY_CAPACITY>,
    history_count: usize,
}

fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}
