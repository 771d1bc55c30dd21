//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It carries this tick's raw inputs, the occupancy state the
//! handlers maintain, timing information and configuration.

use crate::config::NodeConfig;

// ---------------------------------------------------------------------------
// Tick inputs (read-only to state handlers; written by the service)
// ---------------------------------------------------------------------------

/// Raw inputs sampled for the current tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInputs {
    /// PIR output level this tick.
    pub motion_detected: bool,
    /// Ambient light, 0-100%.
    pub light_percent: f32,
}

// ---------------------------------------------------------------------------
// Occupancy state (written by state handlers and the service)
// ---------------------------------------------------------------------------

/// Everything the node decides each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyState {
    pub motion_detected: bool,
    /// Seconds since motion was last seen.
    pub no_motion_secs: u32,
    pub buzzer_on: bool,
    pub session_active: bool,
    /// Length of the current session; zero while alarmed.
    pub session_secs: u32,
    /// Seconds of continuous low light.
    pub low_light_secs: u32,
    pub led_on: bool,
    /// Fan PWM duty (0-255).
    pub fan_duty: u8,
}

impl Default for OccupancyState {
    fn default() -> Self {
        Self {
            motion_detected: false,
            no_motion_secs: 0,
            buzzer_on: false,
            session_active: true,
            session_secs: 0,
            low_light_secs: 0,
            led_on: false,
            fan_duty: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Duration of one tick in whole seconds.
    pub tick_secs: u32,

    // -- Inputs --
    pub inputs: TickInputs,

    // -- Outputs --
    pub state: OccupancyState,

    // -- Configuration --
    pub config: NodeConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: NodeConfig) -> Self {
        Self {
            ticks_in_state: 0,
            tick_secs: config.tick_secs(),
            inputs: TickInputs::default(),
            state: OccupancyState::default(),
            config,
        }
    }

    /// Seconds elapsed since the current state was entered.
    pub fn secs_in_state(&self) -> u64 {
        self.ticks_in_state * u64::from(self.tick_secs)
    }

    /// Whether the absence timer has reached the configured threshold.
    pub fn absence_elapsed(&self) -> bool {
        self.state.no_motion_secs >= self.config.absence_threshold_secs
    }
}
