//! Outbound application events.
//!
//! The [`NodeService`](super::service::NodeService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, redraw the LCD, etc.

use crate::error::DecodeError;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The occupancy FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The session timer advanced to this many seconds.
    SessionTime(u32),

    /// The presence LED switched.
    LedChanged(bool),

    /// Fan duty changed, with the temperature that produced it.
    FanDutyChanged { duty: u8, temperature_c: f32 },

    /// This tick's climate transaction failed; previous values are kept.
    ClimateReadFailed(DecodeError),

    /// End-of-tick status.
    Telemetry(NodeStatus),
}

/// A point-in-time view of everything the node measures and decides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStatus {
    pub state: StateId,
    /// Last good climate reading (stale after a failed transaction).
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// Whether any climate transaction has ever succeeded.
    pub climate_valid: bool,
    pub ldr_raw: u16,
    pub light_percent: f32,
    pub motion_detected: bool,
    /// Rising edges seen on the motion input since boot.
    pub motion_count: u32,
    pub led_on: bool,
    pub buzzer_on: bool,
    pub fan_duty: u8,
    pub session_active: bool,
    pub session_secs: u32,
}

impl NodeStatus {
    /// Boot-time status: session active, everything else zero.
    pub const fn new() -> Self {
        Self {
            state: StateId::SessionActive,
            temperature_c: 0.0,
            humidity_pct: 0.0,
            climate_valid: false,
            ldr_raw: 0,
            light_percent: 0.0,
            motion_detected: false,
            motion_count: 0,
            led_on: false,
            buzzer_on: false,
            fan_duty: 0,
            session_active: true,
            session_secs: 0,
        }
    }

    pub fn temperature_f(&self) -> f32 {
        self.temperature_c * 1.8 + 32.0
    }
}

impl Default for NodeStatus {
    fn default() -> Self {
        Self::new()
    }
}
