//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only
//! module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::fan::FanDriver;
use crate::drivers::indicator::Indicator;
use crate::sensors::{SensorHub, SensorSnapshot};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, D> {
    sensor_hub: SensorHub<P, D>,
    fan: FanDriver,
    buzzer: Indicator,
    led: Indicator,
}

impl<P, D> HardwareAdapter<P, D> {
    pub fn new(
        sensor_hub: SensorHub<P, D>,
        fan: FanDriver,
        buzzer: Indicator,
        led: Indicator,
    ) -> Self {
        Self {
            sensor_hub,
            fan,
            buzzer,
            led,
        }
    }

    pub fn fan(&self) -> &FanDriver {
        &self.fan
    }

    pub fn buzzer(&self) -> &Indicator {
        &self.buzzer
    }

    pub fn led(&self) -> &Indicator {
        &self.led
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, D> SensorPort for HardwareAdapter<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P, D> ActuatorPort for HardwareAdapter<P, D> {
    fn set_led(&mut self, on: bool) {
        self.led.set(on);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn set_fan_duty(&mut self, duty: u8) {
        self.fan.set_duty(duty);
    }

    fn all_off(&mut self) {
        self.fan.stop();
        self.buzzer.off();
        self.led.off();
    }
}
