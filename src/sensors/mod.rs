//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! tick that the service feeds into the occupancy rules.

pub mod dht22;
pub mod light;
pub mod motion;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::error::DecodeError;
use dht22::{Dht22, Reading};
use light::LightSensor;
use motion::MotionSensor;

/// A point-in-time snapshot of every sensor on the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSnapshot {
    /// This tick's climate transaction.  A failure carries no values.
    pub climate: Result<Reading, DecodeError>,
    /// Raw LDR ADC reading (0-4095).
    pub ldr_raw: u16,
    /// Inverted light level, 0-100 %.
    pub light_percent: f32,
    /// PIR output level.
    pub motion_detected: bool,
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub<P, D> {
    pub climate: Dht22<P, D>,
    pub light: LightSensor,
    pub motion: MotionSensor,
    consecutive_climate_failures: u32,
}

impl<P, D> SensorHub<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(climate: Dht22<P, D>, light: LightSensor, motion: MotionSensor) -> Self {
        Self {
            climate,
            light,
            motion,
            consecutive_climate_failures: 0,
        }
    }

    /// Read every sensor and return a unified snapshot.
    ///
    /// A failed climate transaction is passed through for the service to
    /// report; the other sensors are still read, so one flaky wire never
    /// stalls the occupancy logic.
    pub fn read_all(&mut self) -> SensorSnapshot {
        let climate = self.climate.read();
        match &climate {
            Ok(_) => self.consecutive_climate_failures = 0,
            Err(e) => {
                self.consecutive_climate_failures += 1;
                debug!(
                    "DHT22 transaction failed: {} ({} in a row)",
                    e, self.consecutive_climate_failures
                );
            }
        }

        let light = self.light.read();
        let motion_detected = self.motion.read();

        SensorSnapshot {
            climate,
            ldr_raw: light.raw,
            light_percent: light.percent,
            motion_detected,
        }
    }

    /// Climate transactions failed back-to-back up to now.
    pub fn consecutive_climate_failures(&self) -> u32 {
        self.consecutive_climate_failures
    }
}
