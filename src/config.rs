//! Node configuration parameters
//!
//! All tunable parameters for the RoomSense node. Pin assignments live in
//! [`crate::pins`]; everything here is behavioural.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sensors::dht22::LineTiming;

/// Core node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    // --- Timing ---
    /// Sampling loop period (milliseconds)
    pub tick_interval_ms: u32,
    /// Telemetry document interval (seconds)
    pub telemetry_interval_secs: u32,

    // --- Occupancy ---
    /// Seconds without motion before the session is reset and the buzzer sounds
    pub absence_threshold_secs: u32,

    // --- Light ---
    /// Light level (0-100%) below which the room counts as dark
    pub low_light_threshold_percent: f32,
    /// Seconds of continuous darkness before the LED turns on
    pub low_light_delay_secs: u32,

    // --- Climate sensor ---
    /// Single-wire transaction timing
    pub dht: LineTiming,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_interval_ms: 1000,     // 1 Hz
            telemetry_interval_secs: 5, // matches the dashboard poll rate

            // Occupancy
            absence_threshold_secs: 10,

            // Light
            low_light_threshold_percent: 50.0,
            low_light_delay_secs: 5,

            dht: LineTiming::default(),
        }
    }
}

impl NodeConfig {
    /// Length of one tick in whole seconds (the occupancy counters use
    /// second resolution).
    pub fn tick_secs(&self) -> u32 {
        (self.tick_interval_ms / 1000).max(1)
    }

    /// Reject configurations the node cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms < 1000 || self.tick_interval_ms % 1000 != 0 {
            return Err(Error::Config("tick interval must be a whole number of seconds"));
        }
        if self.telemetry_interval_secs == 0 {
            return Err(Error::Config("telemetry interval must be non-zero"));
        }
        if self.absence_threshold_secs == 0 {
            return Err(Error::Config("absence threshold must be non-zero"));
        }
        if !(0.0..=100.0).contains(&self.low_light_threshold_percent) {
            return Err(Error::Config("low-light threshold must be within 0-100%"));
        }
        if self.dht.edge_timeout_us == 0 {
            return Err(Error::Config("DHT edge timeout must be non-zero"));
        }
        if self.dht.bit_sample_offset_us >= self.dht.edge_timeout_us {
            return Err(Error::Config("DHT sample offset must be inside the edge budget"));
        }
        Ok(())
    }
}
