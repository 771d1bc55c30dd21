//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::StateId;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(s) => {
                info!(
                    "Temp: {:.1}\u{00b0}C, Humid: {:.1}%, Light: {:.1}%, Motion: {}",
                    s.temperature_c,
                    s.humidity_pct,
                    s.light_percent,
                    if s.motion_detected { "YES" } else { "NO" },
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
                match to {
                    StateId::Alarmed => info!("Buzzer ON - no motion, session reset"),
                    StateId::SessionActive => {
                        info!("Buzzer OFF - motion detected, session restarted");
                    }
                }
            }
            AppEvent::SessionTime(_) => {}
            AppEvent::LedChanged(on) => {
                info!("LED | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::FanDutyChanged {
                duty,
                temperature_c,
            } => {
                info!(
                    "FAN | duty={} ({}%) at {:.1}\u{00b0}C",
                    duty,
                    u16::from(*duty) * 100 / 255,
                    temperature_c
                );
            }
            AppEvent::ClimateReadFailed(e) => {
                warn!("CLIMATE | read failed: {}", e);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state);
            }
        }
    }
}
